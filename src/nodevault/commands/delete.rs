use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::events::{EventBus, EventKind};
use crate::model::RecordId;
use crate::store::DataStore;
use tracing::debug;

/// Remove a record. Returns whether anything was removed.
pub fn delete_record<S: DataStore>(
    store: &mut S,
    events: &EventBus,
    id: RecordId,
) -> Result<bool> {
    let removed = store.delete_record(id)?;
    if removed {
        debug!(id, "record deleted");
        events.emit(EventKind::Deleted, id);
    }
    Ok(removed)
}

pub fn run<S: DataStore>(store: &mut S, events: &EventBus, id: RecordId) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let not_found = CmdMessage::warning(format!("Record {} not found.", id));

    let Some(record) = store.get_record(id)? else {
        result.add_message(not_found);
        return Ok(result);
    };
    if !delete_record(store, events, id)? {
        result.add_message(not_found);
        return Ok(result);
    }

    result.add_message(CmdMessage::success(format!(
        "Record deleted (ID {}): {}",
        record.id, record.name
    )));
    Ok(result.with_affected_records(vec![record]))
}
