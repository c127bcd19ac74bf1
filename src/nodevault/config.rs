use crate::error::{Result, VaultError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";
pub const BACKUP_DIRNAME: &str = "backups";

/// Which backend holds the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    File,
    Memory,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::File => f.write_str("file"),
            StorageKind::Memory => f.write_str("memory"),
        }
    }
}

impl FromStr for StorageKind {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(StorageKind::File),
            "memory" => Ok(StorageKind::Memory),
            other => Err(VaultError::Validation(format!(
                "Unknown storage '{}' (expected file or memory)",
                other
            ))),
        }
    }
}

/// Configuration for the vault, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VaultConfig {
    #[serde(default)]
    pub storage: StorageKind,

    /// Snapshot the vault after every add and delete
    #[serde(default = "default_auto_backup")]
    pub auto_backup: bool,

    /// Where `export.txt` goes; the working directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Where backups go; `<data dir>/backups` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,
}

fn default_auto_backup() -> bool {
    true
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::default(),
            auto_backup: default_auto_backup(),
            export_dir: None,
            backup_dir: None,
        }
    }
}

/// Keys accepted by `config <key> [value]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Storage,
    AutoBackup,
    ExportDir,
    BackupDir,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::Storage,
        ConfigKey::AutoBackup,
        ConfigKey::ExportDir,
        ConfigKey::BackupDir,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::Storage => "storage",
            ConfigKey::AutoBackup => "auto-backup",
            ConfigKey::ExportDir => "export-dir",
            ConfigKey::BackupDir => "backup-dir",
        }
    }
}

impl FromStr for ConfigKey {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| VaultError::Validation(format!("Unknown config key: {}", s)))
    }
}

impl VaultConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(VaultError::Io)?;
        let config: VaultConfig =
            serde_json::from_str(&content).map_err(VaultError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(VaultError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(VaultError::Serialization)?;
        fs::write(config_path, content).map_err(VaultError::Io)?;
        Ok(())
    }

    /// Current value of a key, as shown by `config <key>`.
    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::Storage => self.storage.to_string(),
            ConfigKey::AutoBackup => self.auto_backup.to_string(),
            ConfigKey::ExportDir => display_dir(&self.export_dir, "(working directory)"),
            ConfigKey::BackupDir => display_dir(&self.backup_dir, "(data directory)/backups"),
        }
    }

    /// Set a key from its textual form. Empty values reset directories.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::Storage => self.storage = value.parse()?,
            ConfigKey::AutoBackup => self.auto_backup = parse_bool(value)?,
            ConfigKey::ExportDir => self.export_dir = parse_dir(value),
            ConfigKey::BackupDir => self.backup_dir = parse_dir(value),
        }
        Ok(())
    }

    pub fn export_dir_or(&self, fallback: &Path) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| fallback.to_path_buf())
    }

    pub fn backup_dir_in(&self, data_dir: &Path) -> PathBuf {
        self.backup_dir
            .clone()
            .unwrap_or_else(|| data_dir.join(BACKUP_DIRNAME))
    }
}

fn display_dir(dir: &Option<PathBuf>, default_label: &str) -> String {
    dir.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| default_label.to_string())
}

fn parse_dir(value: &str) -> Option<PathBuf> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(VaultError::Validation(format!(
            "Expected true or false, got '{}'",
            other
        ))),
    }
}
