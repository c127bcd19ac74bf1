use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::events::{EventBus, EventKind};
use crate::model::{Record, RecordId};
use crate::store::DataStore;
use tracing::debug;

/// Overwrite name and value of an existing record. `created` is left alone.
/// Returns `None` when the id is unknown; the store is not touched then.
pub fn update_record<S: DataStore>(
    store: &mut S,
    events: &EventBus,
    id: RecordId,
    name: String,
    value: String,
) -> Result<Option<Record>> {
    let Some(mut record) = store.get_record(id)? else {
        return Ok(None);
    };
    record.name = name;
    record.value = value;

    if !store.replace_record(&record)? {
        return Ok(None);
    }
    debug!(id, "record updated");
    events.emit(EventKind::Updated, id);
    Ok(Some(record))
}

pub fn run<S: DataStore>(
    store: &mut S,
    events: &EventBus,
    id: RecordId,
    name: String,
    value: String,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match update_record(store, events, id, name, value)? {
        Some(record) => {
            result.add_message(CmdMessage::success(format!(
                "Record updated (ID {}): {}",
                record.id, record.name
            )));
            result.affected_records.push(record);
        }
        None => result.add_message(CmdMessage::warning(format!("Record {} not found.", id))),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add::add_record;
    use crate::events::VaultEvent;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn changes_name_and_value_but_not_created() {
        let mut store = StoreFixture::new().with_record("Bob", "x2").store;
        let before = store.get_record(1).unwrap().unwrap();

        let updated = update_record(&mut store, &EventBus::new(), 1, "Bobby".into(), "x3".into())
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Bobby");
        assert_eq!(updated.value, "x3");
        assert_eq!(updated.created, before.created);
        assert_eq!(store.get_record(1).unwrap().unwrap(), updated);
    }

    #[test]
    fn unknown_id_leaves_store_unchanged() {
        let mut store = StoreFixture::new().with_records(2).store;
        let before = store.list_records().unwrap();

        let outcome = update_record(&mut store, &EventBus::new(), 42, "x".into(), "y".into());

        assert_eq!(outcome.unwrap(), None);
        assert_eq!(store.list_records().unwrap(), before);
    }

    #[test]
    fn run_reports_missing_record() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, &EventBus::new(), 3, "a".into(), "b".into()).unwrap();
        assert!(result.affected_records.is_empty());
        assert_eq!(result.messages[0].content, "Record 3 not found.");
    }

    #[test]
    fn emits_only_on_success() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let events = EventBus::new().with_observer(move |e: &VaultEvent| {
            sink.borrow_mut().push((e.kind, e.id));
        });
        let mut store = InMemoryStore::new();
        add_record(&mut store, &EventBus::new(), "a".into(), "b".into()).unwrap();

        update_record(&mut store, &events, 5, "x".into(), "y".into()).unwrap();
        update_record(&mut store, &events, 1, "x".into(), "y".into()).unwrap();

        assert_eq!(*seen.borrow(), vec![(EventKind::Updated, 1)]);
    }

    #[test]
    fn write_failure_is_an_error() {
        let mut store = StoreFixture::new().with_record("Bob", "x2").store;
        store.set_simulate_write_error(true);

        assert!(update_record(&mut store, &EventBus::new(), 1, "B".into(), "v".into()).is_err());
        store.set_simulate_write_error(false);
        assert_eq!(store.get_record(1).unwrap().unwrap().name, "Bob");
    }
}
