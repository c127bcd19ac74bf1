use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "nodevault", bin_name = "nodevault", version)]
#[command(about = "Keep a small vault of name/value records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use a throwaway in-memory vault for this run
    #[arg(short, long, global = true)]
    pub memory: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a record
    #[command(alias = "a")]
    Add {
        name: String,

        #[arg(default_value = "")]
        value: String,
    },

    /// List all records
    #[command(alias = "ls")]
    List,

    /// Show one record
    #[command(alias = "v")]
    View { id: String },

    /// Replace a record's name and value
    #[command(alias = "u")]
    Update {
        id: String,

        name: String,

        #[arg(default_value = "")]
        value: String,
    },

    /// Delete a record
    #[command(alias = "rm")]
    Delete { id: String },

    /// Find records whose id or name contains a keyword
    #[command(alias = "s")]
    Search { keyword: String },

    /// List records ordered by name or creation time
    Sort {
        /// name or created
        field: String,

        /// asc or desc
        #[arg(default_value = "asc")]
        order: String,
    },

    /// Show vault statistics
    Stats,

    /// Write a plain-text export of all records
    Export,

    /// Write a JSON snapshot of all records
    Backup,

    /// Get or set configuration
    Config {
        /// Configuration key (storage, auto-backup, export-dir, backup-dir)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Start the interactive menu (the default)
    Menu,
}
