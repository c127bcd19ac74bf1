use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::model::Record;
use crate::store::DataStore;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `backup_<ISO-8601 to the second, colons as hyphens>.json`
pub fn backup_file_name(now: DateTime<Utc>) -> String {
    format!("backup_{}.json", now.format("%Y-%m-%dT%H-%M-%S"))
}

/// Serialize the full record list into a new file under `dir`. Two backups
/// taken within the same second get `_1`, `_2`, ... suffixes.
pub fn write_backup(records: &[Record], dir: &Path, now: DateTime<Utc>) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(VaultError::Io)?;
    }

    let path = unique_path(dir, &backup_file_name(now));
    let content = serde_json::to_string_pretty(records).map_err(VaultError::Serialization)?;
    fs::write(&path, content).map_err(VaultError::Io)?;
    debug!(records = records.len(), path = %path.display(), "backup written");
    Ok(path)
}

fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }
    let stem = file_name.trim_end_matches(".json");
    (1..)
        .map(|n| dir.join(format!("{}_{}.json", stem, n)))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

pub fn run<S: DataStore>(store: &S, backup_dir: &Path) -> Result<CmdResult> {
    let records = store.list_records()?;
    let path = write_backup(&records, backup_dir, Utc::now())?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Backup created successfully: {}",
        file_name
    )));
    Ok(result.with_artifact(path))
}
