use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::model::Record;
use crate::store::DataStore;
use chrono::{Local, NaiveDateTime};
use std::fs;
use std::path::Path;

pub const EXPORT_FILENAME: &str = "export.txt";
const TOTAL_PREFIX: &str = "Total Records: ";

/// Human-readable dump of the records. The output only depends on its
/// arguments, so the clock is passed in.
pub fn render(records: &[Record], now: NaiveDateTime, file_name: &str) -> String {
    let mut out = format!(
        "Vault Export\nDate: {}\n{}{}\nFile: {}\n\n",
        now.format("%Y-%m-%d %H:%M:%S"),
        TOTAL_PREFIX,
        records.len(),
        file_name
    );

    for (idx, record) in records.iter().enumerate() {
        out.push_str(&format!(
            "{}. ID: {} | Name: {} | Value: {} | Created: {}\n",
            idx + 1,
            record.id,
            record.name,
            record.value,
            record.created_label()
        ));
    }
    out
}

/// Reads the record count back out of an export header.
pub fn parse_export_total(text: &str) -> Option<usize> {
    text.lines()
        .find_map(|line| line.strip_prefix(TOTAL_PREFIX))
        .and_then(|n| n.trim().parse().ok())
}

pub fn run<S: DataStore>(store: &S, export_dir: &Path) -> Result<CmdResult> {
    let records = store.list_records()?;
    let mut result = CmdResult::default();

    if records.is_empty() {
        result.add_message(CmdMessage::info("Vault is empty. Nothing to export."));
        return Ok(result);
    }

    if !export_dir.exists() {
        fs::create_dir_all(export_dir).map_err(VaultError::Io)?;
    }
    let path = export_dir.join(EXPORT_FILENAME);
    let text = render(&records, Local::now().naive_local(), EXPORT_FILENAME);
    fs::write(&path, text).map_err(VaultError::Io)?;

    result.add_message(CmdMessage::success(format!(
        "Data exported successfully to {}",
        path.display()
    )));
    Ok(result.with_artifact(path))
}
