use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::RecordId;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, id: RecordId) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.get_record(id)? {
        Some(record) => result.listed_records.push(record),
        None => result.add_message(CmdMessage::warning(format!("Record {} not found.", id))),
    }
    Ok(result)
}
