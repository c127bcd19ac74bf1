//! # Storage Layer
//!
//! The [`DataStore`] trait is the record store's persistence seam. Commands
//! only ever talk to this trait, so the same logic runs against a JSON file
//! in production and a plain `Vec` in tests or ephemeral sessions.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one JSON document (`vault.json`) holding the ordered
//!   record list plus the id high-water mark. Every write goes through a
//!   temp file and a rename, so a failed save leaves the previous document
//!   in place.
//! - [`memory::InMemoryStore`]: no persistence. Used for `--memory` sessions
//!   and throughout the test suite.
//!
//! ## Ordering and ids
//!
//! Stores keep records in insertion order; `replace_record` updates in place
//! and never moves a record. Ids are handed out by [`DataStore::next_id`]:
//! one past the larger of the highest id currently stored and the highest id
//! ever inserted, so deleting the newest record never frees its id.

use crate::error::{Result, VaultError};
use crate::model::{Record, RecordId};

pub mod fs;
pub mod memory;

/// Abstract interface for record storage.
pub trait DataStore {
    /// All records, in insertion order.
    fn list_records(&self) -> Result<Vec<Record>>;

    /// Look a record up by id.
    fn get_record(&self, id: RecordId) -> Result<Option<Record>>;

    /// The id the next inserted record should get.
    fn next_id(&self) -> Result<RecordId>;

    /// Append a new record at the end of the list.
    fn insert_record(&mut self, record: &Record) -> Result<()>;

    /// Overwrite the record with the same id, keeping its position.
    /// Returns `false` (and changes nothing) when no such record exists.
    fn replace_record(&mut self, record: &Record) -> Result<bool>;

    /// Remove a record. Returns `false` when no such record exists.
    fn delete_record(&mut self, id: RecordId) -> Result<bool>;
}

impl<S: DataStore + ?Sized> DataStore for Box<S> {
    fn list_records(&self) -> Result<Vec<Record>> {
        (**self).list_records()
    }

    fn get_record(&self, id: RecordId) -> Result<Option<Record>> {
        (**self).get_record(id)
    }

    fn next_id(&self) -> Result<RecordId> {
        (**self).next_id()
    }

    fn insert_record(&mut self, record: &Record) -> Result<()> {
        (**self).insert_record(record)
    }

    fn replace_record(&mut self, record: &Record) -> Result<bool> {
        (**self).replace_record(record)
    }

    fn delete_record(&mut self, id: RecordId) -> Result<bool> {
        (**self).delete_record(id)
    }
}

/// Id allocation shared by the backends. Fails once `RecordId::MAX` has been
/// handed out, since wrapping around would reuse ids.
pub(crate) fn allocate_id(records: &[Record], last_id: RecordId) -> Result<RecordId> {
    let max_existing = records.iter().map(|r| r.id).max().unwrap_or(0);
    max_existing
        .max(last_id)
        .checked_add(1)
        .ok_or_else(|| VaultError::Store("record id space exhausted".to_string()))
}
