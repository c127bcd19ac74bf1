use super::{allocate_id, DataStore};
use crate::error::{Result, VaultError};
use crate::model::{Record, RecordId};

/// In-memory storage for tests and ephemeral sessions.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    records: Vec<Record>,
    last_id: RecordId,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every mutating call fail, for exercising error paths.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error {
            return Err(VaultError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl DataStore for InMemoryStore {
    fn list_records(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }

    fn get_record(&self, id: RecordId) -> Result<Option<Record>> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    fn next_id(&self) -> Result<RecordId> {
        allocate_id(&self.records, self.last_id)
    }

    fn insert_record(&mut self, record: &Record) -> Result<()> {
        self.check_writable()?;
        self.last_id = self.last_id.max(record.id);
        self.records.push(record.clone());
        Ok(())
    }

    fn replace_record(&mut self, record: &Record) -> Result<bool> {
        self.check_writable()?;
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_record(&mut self, id: RecordId) -> Result<bool> {
        self.check_writable()?;
        match self.records.iter().position(|r| r.id == id) {
            Some(pos) => {
                self.records.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Timestamp;
    use chrono::{DateTime, Utc};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        fn push(mut self, record: Record) -> Self {
            self.store.insert_record(&record).unwrap();
            self
        }

        pub fn with_records(mut self, count: usize) -> Self {
            for i in 0..count {
                let id = self.store.next_id().unwrap();
                let record = Record::new(
                    id,
                    format!("Record {}", i + 1),
                    format!("value {}", i + 1),
                );
                self = self.push(record);
            }
            self
        }

        pub fn with_record(self, name: &str, value: &str) -> Self {
            let id = self.store.next_id().unwrap();
            self.push(Record::new(id, name.to_string(), value.to_string()))
        }

        /// A record created at an RFC 3339 instant.
        pub fn with_record_at(self, name: &str, created: &str) -> Self {
            let id = self.store.next_id().unwrap();
            let created: DateTime<Utc> = created.parse().unwrap();
            self.push(Record {
                id,
                name: name.to_string(),
                value: String::new(),
                created: Some(Timestamp::Valid(created)),
            })
        }

        /// A record whose stored timestamp does not parse.
        pub fn with_garbled_record(self, name: &str, raw_created: &str) -> Self {
            let id = self.store.next_id().unwrap();
            self.push(Record {
                id,
                name: name.to_string(),
                value: String::new(),
                created: Some(Timestamp::Invalid(raw_created.to_string())),
            })
        }

        /// A record with no timestamp at all.
        pub fn with_undated_record(self, name: &str) -> Self {
            let id = self.store.next_id().unwrap();
            self.push(Record {
                id,
                name: name.to_string(),
                value: String::new(),
                created: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_not_reused_after_deleting_the_newest() {
        let mut store = InMemoryStore::new();
        let first = Record::new(store.next_id().unwrap(), "a".into(), "".into());
        store.insert_record(&first).unwrap();
        let second = Record::new(store.next_id().unwrap(), "b".into(), "".into());
        store.insert_record(&second).unwrap();

        assert!(store.delete_record(2).unwrap());
        assert_eq!(store.next_id().unwrap(), 3);
    }

    #[test]
    fn replace_keeps_position() {
        let mut store = fixtures::StoreFixture::new().with_records(3).store;
        let mut middle = store.get_record(2).unwrap().unwrap();
        middle.name = "changed".into();
        assert!(store.replace_record(&middle).unwrap());

        let names: Vec<_> = store
            .list_records()
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Record 1", "changed", "Record 3"]);
    }

    #[test]
    fn simulated_write_error_leaves_records_untouched() {
        let mut store = fixtures::StoreFixture::new().with_records(1).store;
        store.set_simulate_write_error(true);

        assert!(store.delete_record(1).is_err());
        store.set_simulate_write_error(false);
        assert_eq!(store.list_records().unwrap().len(), 1);
    }
}
