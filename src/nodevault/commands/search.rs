use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::model::Record;
use crate::store::DataStore;

/// A normalized, non-empty search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword(String);

impl Keyword {
    /// Trims and lower-cases the input. Blank input is rejected rather than
    /// being treated as "match everything".
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(VaultError::Validation("No keyword entered".to_string()));
        }
        Ok(Self(normalized))
    }

    /// Substring match against the decimal id or the name, ignoring case.
    pub fn matches(&self, record: &Record) -> bool {
        record.id.to_string().contains(&self.0) || record.name.to_lowercase().contains(&self.0)
    }
}

/// Lazily yields the matching records in list order. The iterator is
/// `Clone`, so a caller can walk the results more than once.
pub fn search<'a>(
    records: &'a [Record],
    keyword: &'a Keyword,
) -> impl Iterator<Item = &'a Record> + Clone + 'a {
    records.iter().filter(move |record| keyword.matches(record))
}

pub fn run<S: DataStore>(store: &S, raw_keyword: &str) -> Result<CmdResult> {
    let keyword = Keyword::parse(raw_keyword)?;
    let records = store.list_records()?;
    let mut result = CmdResult::default();

    if records.is_empty() {
        result.add_message(CmdMessage::info("Vault is empty. No records to search."));
        return Ok(result);
    }

    let matches: Vec<Record> = search(&records, &keyword).cloned().collect();
    match matches.len() {
        0 => result.add_message(CmdMessage::info("No records found.")),
        1 => result.add_message(CmdMessage::info("Found 1 matching record:")),
        n => result.add_message(CmdMessage::info(format!("Found {} matching records:", n))),
    }
    Ok(result.with_listed_records(matches))
}
