//! # API Facade
//!
//! [`VaultApi`] is the single entry point for every vault operation. It owns
//! the store and the event observers, dispatches to `commands::*`, and hands
//! back a [`CmdResult`]. It never prints and never decides how results look.
//!
//! Generic over [`DataStore`]:
//! - Production: `VaultApi<FileStore>` (or a boxed store picked at runtime)
//! - Testing: `VaultApi<InMemoryStore>`
//!
//! Tests here check dispatch and argument plumbing only; behavior is covered
//! next to each command.

use crate::commands;
use crate::error::{Result, VaultError};
use crate::events::EventBus;
use crate::model::{Record, RecordId};
use crate::store::DataStore;

pub struct VaultApi<S: DataStore> {
    store: S,
    events: EventBus,
    paths: commands::VaultPaths,
}

impl<S: DataStore> VaultApi<S> {
    pub fn new(store: S, events: EventBus, paths: commands::VaultPaths) -> Self {
        Self {
            store,
            events,
            paths,
        }
    }

    pub fn add_record(&mut self, name: String, value: String) -> Result<CmdResult> {
        commands::add::run(&mut self.store, &self.events, name, value)
    }

    pub fn list_records(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn view_record(&self, id: &str) -> Result<CmdResult> {
        commands::view::run(&self.store, parse_id(id)?)
    }

    pub fn update_record(&mut self, id: &str, name: String, value: String) -> Result<CmdResult> {
        let id = parse_id(id)?;
        commands::update::run(&mut self.store, &self.events, id, name, value)
    }

    pub fn delete_record(&mut self, id: &str) -> Result<CmdResult> {
        let id = parse_id(id)?;
        commands::delete::run(&mut self.store, &self.events, id)
    }

    pub fn search_records(&self, keyword: &str) -> Result<CmdResult> {
        commands::search::run(&self.store, keyword)
    }

    pub fn sort_records(&self, field: &str, order: &str) -> Result<CmdResult> {
        commands::sort::run(&self.store, field, order)
    }

    pub fn stats(&self) -> Result<CmdResult> {
        commands::stats::run(&self.store)
    }

    pub fn export(&self) -> Result<CmdResult> {
        commands::export::run(&self.store, &self.paths.export_dir)
    }

    pub fn backup(&self) -> Result<CmdResult> {
        commands::backup::run(&self.store, &self.paths.backup_dir)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn paths(&self) -> &commands::VaultPaths {
        &self.paths
    }

    // --- Typed record-store calls, for callers that do their own reporting ---

    pub fn add(&mut self, name: String, value: String) -> Result<Record> {
        commands::add::add_record(&mut self.store, &self.events, name, value)
    }

    pub fn list(&self) -> Result<Vec<Record>> {
        self.store.list_records()
    }

    pub fn get(&self, id: RecordId) -> Result<Option<Record>> {
        self.store.get_record(id)
    }

    pub fn update(&mut self, id: RecordId, name: String, value: String) -> Result<Option<Record>> {
        commands::update::update_record(&mut self.store, &self.events, id, name, value)
    }

    pub fn delete(&mut self, id: RecordId) -> Result<bool> {
        commands::delete::delete_record(&mut self.store, &self.events, id)
    }
}

/// Record ids come in as text from the UI; anything but a plain
/// non-negative integer is rejected here instead of silently missing.
pub fn parse_id(input: &str) -> Result<RecordId> {
    input
        .trim()
        .parse()
        .map_err(|_| VaultError::Validation(format!("Invalid record id: '{}'", input.trim())))
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::stats::VaultStats;
pub use commands::{CmdMessage, CmdResult, MessageLevel, VaultPaths};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VaultConfig;
    use crate::events::{EventKind, VaultEvent};
    use crate::store::memory::InMemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn api(dir: &TempDir, events: EventBus) -> VaultApi<InMemoryStore> {
        let data_dir = dir.path().to_path_buf();
        let paths = VaultPaths::resolve(data_dir, &VaultConfig::default(), dir.path());
        VaultApi::new(InMemoryStore::new(), events, paths)
    }

    #[test]
    fn parse_id_rejects_non_numbers() {
        assert_eq!(parse_id(" 12 ").unwrap(), 12);
        assert!(matches!(parse_id("abc"), Err(VaultError::Validation(_))));
        assert!(matches!(parse_id("-1"), Err(VaultError::Validation(_))));
        assert!(matches!(parse_id(""), Err(VaultError::Validation(_))));
    }

    #[test]
    fn mutations_reach_the_observers() {
        let dir = TempDir::new().unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let events = EventBus::new().with_observer(move |e: &VaultEvent| {
            sink.borrow_mut().push(e.kind);
        });
        let mut api = api(&dir, events);

        api.add_record("Alice".into(), "x1".into()).unwrap();
        api.update_record("1", "Alicia".into(), "x2".into()).unwrap();
        api.delete_record("1").unwrap();
        api.delete_record("1").unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![EventKind::Added, EventKind::Updated, EventKind::Deleted]
        );
    }

    #[test]
    fn typed_calls_follow_record_store_semantics() {
        let dir = TempDir::new().unwrap();
        let mut api = api(&dir, EventBus::new());

        let alice = api.add("Alice".into(), "x1".into()).unwrap();
        assert_eq!(api.get(alice.id).unwrap(), Some(alice.clone()));
        assert_eq!(api.update(99, "x".into(), "y".into()).unwrap(), None);
        assert!(api.delete(alice.id).unwrap());
        assert!(!api.delete(alice.id).unwrap());
        assert!(api.list().unwrap().is_empty());
    }

    #[test]
    fn dispatches_views() {
        let dir = TempDir::new().unwrap();
        let mut api = api(&dir, EventBus::new());
        api.add_record("Bob".into(), "x2".into()).unwrap();
        api.add_record("alice".into(), "x1".into()).unwrap();

        let sorted = api.sort_records("name", "asc").unwrap();
        assert_eq!(sorted.listed_records[0].name, "alice");

        let found = api.search_records("bo").unwrap();
        assert_eq!(found.listed_records.len(), 1);

        let stats = api.stats().unwrap().stats.unwrap();
        assert_eq!(stats.total, 2);

        let viewed = api.view_record("2").unwrap();
        assert_eq!(viewed.listed_records[0].name, "alice");
    }

    #[test]
    fn export_and_backup_use_configured_paths() {
        let dir = TempDir::new().unwrap();
        let mut api = api(&dir, EventBus::new());
        api.add_record("Alice".into(), "x1".into()).unwrap();

        let exported = api.export().unwrap().artifact.unwrap();
        assert!(exported.starts_with(&api.paths().export_dir));

        let backup = api.backup().unwrap().artifact.unwrap();
        assert!(backup.starts_with(&api.paths().backup_dir));
    }
}
