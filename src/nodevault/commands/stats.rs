use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Record;
use crate::store::DataStore;
use chrono::{DateTime, Utc};

/// Summary figures over a record list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultStats {
    pub total: usize,
    /// Newest valid creation time, or the epoch when there is none
    pub last_modified: DateTime<Utc>,
    /// First record with the longest name
    pub longest_name: Option<Record>,
    /// `None` when no record has a usable timestamp
    pub earliest: Option<DateTime<Utc>>,
    pub latest: Option<DateTime<Utc>>,
}

impl Default for VaultStats {
    fn default() -> Self {
        Self {
            total: 0,
            last_modified: DateTime::<Utc>::UNIX_EPOCH,
            longest_name: None,
            earliest: None,
            latest: None,
        }
    }
}

pub fn statistics(records: &[Record]) -> VaultStats {
    let mut stats = VaultStats {
        total: records.len(),
        ..VaultStats::default()
    };

    let mut longest_len = 0;
    for record in records {
        let len = record.name.chars().count();
        if stats.longest_name.is_none() || len > longest_len {
            longest_len = len;
            stats.longest_name = Some(record.clone());
        }
    }

    let valid = records.iter().filter_map(Record::created_at);
    stats.earliest = valid.clone().min();
    stats.latest = valid.max();
    if let Some(latest) = stats.latest {
        stats.last_modified = latest;
    }

    stats
}

pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let records = store.list_records()?;
    Ok(CmdResult::default().with_stats(statistics(&records)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn empty_list_is_zeroed() {
        let stats = statistics(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.earliest, None);
        assert_eq!(stats.latest, None);
        assert_eq!(stats.longest_name, None);
        assert_eq!(stats.last_modified, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn ignores_unusable_timestamps() {
        let records = StoreFixture::new()
            .with_record_at("mid", "2023-06-01T00:00:00Z")
            .with_garbled_record("garbled", "31/02/2023")
            .with_undated_record("undated")
            .with_record_at("new", "2024-01-01T00:00:00Z")
            .with_record_at("old", "2022-01-01T00:00:00Z")
            .store
            .list_records()
            .unwrap();

        let stats = statistics(&records);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.earliest, Some(at("2022-01-01T00:00:00Z")));
        assert_eq!(stats.latest, Some(at("2024-01-01T00:00:00Z")));
        assert_eq!(stats.last_modified, at("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn only_garbled_timestamps_leave_range_unavailable() {
        let records = StoreFixture::new()
            .with_garbled_record("a", "soon")
            .with_undated_record("b")
            .store
            .list_records()
            .unwrap();

        let stats = statistics(&records);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.earliest, None);
        assert_eq!(stats.last_modified, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn longest_name_prefers_first_on_tie() {
        let records = StoreFixture::new()
            .with_record("abc", "first")
            .with_record("ab", "")
            .with_record("xyz", "second")
            .store
            .list_records()
            .unwrap();

        let stats = statistics(&records);
        assert_eq!(stats.longest_name.unwrap().value, "first");
    }

    #[test]
    fn longest_name_counts_characters_not_bytes() {
        let records = StoreFixture::new()
            .with_record("ééé", "")
            .with_record("abcd", "winner")
            .store
            .list_records()
            .unwrap();

        assert_eq!(statistics(&records).longest_name.unwrap().value, "winner");
    }
}
