use super::{allocate_id, DataStore};
use crate::error::{Result, VaultError};
use crate::model::{Record, RecordId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

pub const DATA_FILENAME: &str = "vault.json";

/// On-disk layout of `vault.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct VaultDocument {
    #[serde(default)]
    last_id: RecordId,
    #[serde(default)]
    records: Vec<Record>,
}

/// Older vaults were saved as a bare array of records.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredVault {
    Document(VaultDocument),
    Bare(Vec<Record>),
}

impl From<StoredVault> for VaultDocument {
    fn from(stored: StoredVault) -> Self {
        match stored {
            StoredVault::Document(doc) => doc,
            StoredVault::Bare(records) => VaultDocument {
                last_id: 0,
                records,
            },
        }
    }
}

/// File-backed record store rooted at a data directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join(DATA_FILENAME)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(VaultError::Io)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<VaultDocument> {
        let data_file = self.data_file();
        if !data_file.exists() {
            return Ok(VaultDocument::default());
        }
        let content = fs::read_to_string(&data_file).map_err(VaultError::Io)?;
        if content.trim().is_empty() {
            return Ok(VaultDocument::default());
        }
        let stored: StoredVault =
            serde_json::from_str(&content).map_err(VaultError::Serialization)?;
        Ok(stored.into())
    }

    fn save(&self, doc: &VaultDocument) -> Result<()> {
        self.ensure_dir(&self.root)?;

        let content = serde_json::to_string_pretty(doc).map_err(VaultError::Serialization)?;

        // Write next to the target, then swap it in
        let tmp_file = self.root.join(format!(".vault-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(VaultError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, self.data_file()) {
            let _ = fs::remove_file(&tmp_file);
            return Err(VaultError::Io(e));
        }

        debug!(records = doc.records.len(), path = %self.data_file().display(), "vault saved");
        Ok(())
    }
}

impl DataStore for FileStore {
    fn list_records(&self) -> Result<Vec<Record>> {
        Ok(self.load()?.records)
    }

    fn get_record(&self, id: RecordId) -> Result<Option<Record>> {
        Ok(self.load()?.records.into_iter().find(|r| r.id == id))
    }

    fn next_id(&self) -> Result<RecordId> {
        let doc = self.load()?;
        allocate_id(&doc.records, doc.last_id)
    }

    fn insert_record(&mut self, record: &Record) -> Result<()> {
        let mut doc = self.load()?;
        doc.last_id = doc.last_id.max(record.id);
        doc.records.push(record.clone());
        self.save(&doc)
    }

    fn replace_record(&mut self, record: &Record) -> Result<bool> {
        let mut doc = self.load()?;
        let Some(slot) = doc.records.iter_mut().find(|r| r.id == record.id) else {
            return Ok(false);
        };
        *slot = record.clone();
        self.save(&doc)?;
        Ok(true)
    }

    fn delete_record(&mut self, id: RecordId) -> Result<bool> {
        let mut doc = self.load()?;
        let Some(pos) = doc.records.iter().position(|r| r.id == id) else {
            return Ok(false);
        };
        doc.records.remove(pos);
        // Keep the removed id out of circulation
        doc.last_id = doc.last_id.max(id);
        self.save(&doc)?;
        Ok(true)
    }
}
