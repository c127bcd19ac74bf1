//! Argument dispatch, context setup and per-command handlers.
//!
//! Handlers write to any `io::Write` so the interactive menu and the tests
//! can reuse them unchanged.

use super::menu;
use super::render::{render_messages, render_record, render_records, render_stats};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use nodevault::api::{CmdMessage, CmdResult, ConfigAction, VaultApi, VaultPaths};
use nodevault::config::{StorageKind, VaultConfig};
use nodevault::error::{Result, VaultError};
use nodevault::events::{EventBus, LogObserver};
use nodevault::store::fs::FileStore;
use nodevault::store::memory::InMemoryStore;
use nodevault::store::DataStore;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Overrides the platform data directory.
pub const HOME_ENV: &str = "NODEVAULT_HOME";
/// Log filter, in `tracing_subscriber::EnvFilter` syntax.
pub const LOG_ENV: &str = "NODEVAULT_LOG";

pub(super) struct AppContext {
    pub api: VaultApi<Box<dyn DataStore>>,
    pub auto_backup: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::Add { name, value }) => handle_add(&mut ctx, &mut out, name, value),
        Some(Commands::List) => handle_list(&ctx, &mut out),
        Some(Commands::View { id }) => handle_view(&ctx, &mut out, &id),
        Some(Commands::Update { id, name, value }) => {
            handle_update(&mut ctx, &mut out, &id, name, value)
        }
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, &mut out, &id),
        Some(Commands::Search { keyword }) => handle_search(&ctx, &mut out, &keyword),
        Some(Commands::Sort { field, order }) => handle_sort(&ctx, &mut out, &field, &order),
        Some(Commands::Stats) => handle_stats(&ctx, &mut out),
        Some(Commands::Export) => handle_export(&ctx, &mut out),
        Some(Commands::Backup) => handle_backup(&ctx, &mut out),
        Some(Commands::Config { key, value }) => handle_config(&ctx, &mut out, key, value),
        Some(Commands::Menu) | None => {
            let stdin = io::stdin();
            menu::run(&mut ctx, stdin.lock(), &mut out)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "nodevault=debug"
    } else {
        "warn,nodevault::events=info"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "nodevault", "nodevault")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| VaultError::Store("Could not determine data directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let data_dir = data_dir()?;

    let config = VaultConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "could not read config, using defaults");
        VaultConfig::default()
    });

    let storage = if cli.memory {
        StorageKind::Memory
    } else {
        config.storage
    };
    let store: Box<dyn DataStore> = match storage {
        StorageKind::File => Box::new(FileStore::new(data_dir.clone())),
        StorageKind::Memory => Box::new(InMemoryStore::new()),
    };

    let events = EventBus::new().with_observer(LogObserver);
    let paths = VaultPaths::resolve(data_dir, &config, &cwd);

    // A throwaway vault leaves nothing behind, snapshots included
    Ok(AppContext {
        api: VaultApi::new(store, events, paths),
        auto_backup: config.auto_backup && storage == StorageKind::File,
    })
}

fn print_result<W: Write>(out: &mut W, result: &CmdResult) -> Result<()> {
    write!(out, "{}", render_messages(&result.messages))?;
    Ok(())
}

/// Snapshot after a mutation when auto-backup is on. The mutation already
/// happened, so a failed backup is reported but not returned as an error.
fn auto_backup<W: Write>(ctx: &AppContext, out: &mut W) -> Result<()> {
    if !ctx.auto_backup {
        return Ok(());
    }
    match ctx.api.backup() {
        Ok(result) => print_result(out, &result),
        Err(e) => {
            let warning = CmdMessage::warning(format!("Backup failed: {}", e));
            write!(out, "{}", render_messages(&[warning]))?;
            Ok(())
        }
    }
}

pub(super) fn handle_add<W: Write>(
    ctx: &mut AppContext,
    out: &mut W,
    name: String,
    value: String,
) -> Result<()> {
    let result = ctx.api.add_record(name, value)?;
    print_result(out, &result)?;
    auto_backup(ctx, out)
}

pub(super) fn handle_list<W: Write>(ctx: &AppContext, out: &mut W) -> Result<()> {
    let result = ctx.api.list_records()?;
    write!(out, "{}", render_records(&result.listed_records))?;
    print_result(out, &result)
}

pub(super) fn handle_view<W: Write>(ctx: &AppContext, out: &mut W, id: &str) -> Result<()> {
    let result = ctx.api.view_record(id)?;
    for record in &result.listed_records {
        write!(out, "{}", render_record(record))?;
    }
    print_result(out, &result)
}

pub(super) fn handle_update<W: Write>(
    ctx: &mut AppContext,
    out: &mut W,
    id: &str,
    name: String,
    value: String,
) -> Result<()> {
    let result = ctx.api.update_record(id, name, value)?;
    print_result(out, &result)
}

pub(super) fn handle_delete<W: Write>(ctx: &mut AppContext, out: &mut W, id: &str) -> Result<()> {
    let result = ctx.api.delete_record(id)?;
    print_result(out, &result)?;
    if result.affected_records.is_empty() {
        return Ok(());
    }
    auto_backup(ctx, out)
}

pub(super) fn handle_search<W: Write>(ctx: &AppContext, out: &mut W, keyword: &str) -> Result<()> {
    let result = ctx.api.search_records(keyword)?;
    print_result(out, &result)?;
    write!(out, "{}", render_records(&result.listed_records))?;
    Ok(())
}

pub(super) fn handle_sort<W: Write>(
    ctx: &AppContext,
    out: &mut W,
    field: &str,
    order: &str,
) -> Result<()> {
    let result = ctx.api.sort_records(field, order)?;
    print_result(out, &result)?;
    write!(out, "{}", render_records(&result.listed_records))?;
    Ok(())
}

pub(super) fn handle_stats<W: Write>(ctx: &AppContext, out: &mut W) -> Result<()> {
    let result = ctx.api.stats()?;
    if let Some(stats) = &result.stats {
        write!(out, "{}", render_stats(stats))?;
    }
    print_result(out, &result)
}

pub(super) fn handle_export<W: Write>(ctx: &AppContext, out: &mut W) -> Result<()> {
    let result = ctx.api.export()?;
    print_result(out, &result)
}

pub(super) fn handle_backup<W: Write>(ctx: &AppContext, out: &mut W) -> Result<()> {
    let result = ctx.api.backup()?;
    print_result(out, &result)
}

fn handle_config<W: Write>(
    ctx: &AppContext,
    out: &mut W,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key.parse()?),
        (Some(key), Some(value)) => ConfigAction::Set(key.parse()?, value),
    };
    let result = ctx.api.config(action)?;
    print_result(out, &result)
}
