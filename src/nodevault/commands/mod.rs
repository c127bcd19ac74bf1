use crate::commands::stats::VaultStats;
use crate::config::VaultConfig;
use crate::model::Record;
use std::path::PathBuf;

pub mod add;
pub mod backup;
pub mod config;
pub mod delete;
pub mod export;
pub mod list;
pub mod search;
pub mod sort;
pub mod stats;
pub mod update;
pub mod view;

/// Filesystem locations the commands read from or write to.
#[derive(Debug, Clone)]
pub struct VaultPaths {
    /// Holds `vault.json` and `config.json`
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    pub backup_dir: PathBuf,
}

impl VaultPaths {
    /// Resolve the export and backup locations for a data directory.
    pub fn resolve(data_dir: PathBuf, config: &VaultConfig, cwd: &std::path::Path) -> Self {
        Self {
            export_dir: config.export_dir_or(cwd),
            backup_dir: config.backup_dir_in(&data_dir),
            data_dir,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// What a command hands back to the UI.
#[derive(Debug, Default)]
pub struct CmdResult {
    /// Records created, changed or removed by the command
    pub affected_records: Vec<Record>,
    /// Records to display, in display order
    pub listed_records: Vec<Record>,
    pub stats: Option<VaultStats>,
    /// File written by export or backup
    pub artifact: Option<PathBuf>,
    pub config: Option<VaultConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<Record>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_stats(mut self, stats: VaultStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_artifact(mut self, path: PathBuf) -> Self {
        self.artifact = Some(path);
        self
    }

    pub fn with_config(mut self, config: VaultConfig) -> Self {
        self.config = Some(config);
        self
    }
}
