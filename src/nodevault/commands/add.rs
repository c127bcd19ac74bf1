use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::events::{EventBus, EventKind};
use crate::model::Record;
use crate::store::DataStore;
use tracing::debug;

/// Append a record under the next free id, stamped with the current time.
pub fn add_record<S: DataStore>(
    store: &mut S,
    events: &EventBus,
    name: String,
    value: String,
) -> Result<Record> {
    let id = store.next_id()?;
    let record = Record::new(id, name, value);
    store.insert_record(&record)?;
    debug!(id, "record added");
    events.emit(EventKind::Added, id);
    Ok(record)
}

pub fn run<S: DataStore>(
    store: &mut S,
    events: &EventBus,
    name: String,
    value: String,
) -> Result<CmdResult> {
    let record = add_record(store, events, name, value)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Record added (ID {}): {}",
        record.id, record.name
    )));
    Ok(result.with_affected_records(vec![record]))
}
