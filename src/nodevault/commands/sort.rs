use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::model::Record;
use crate::store::DataStore;
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Created,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortField {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "created" => Ok(SortField::Created),
            other => Err(VaultError::Validation(format!(
                "Invalid sort field '{}' (expected name or created)",
                other
            ))),
        }
    }
}

impl FromStr for SortOrder {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(VaultError::Validation(format!(
                "Invalid sort order '{}' (expected asc or desc)",
                other
            ))),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Name => f.write_str("name"),
            SortField::Created => f.write_str("created"),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("ASC"),
            SortOrder::Desc => f.write_str("DESC"),
        }
    }
}

/// Returns a sorted copy. Names compare case-insensitively; timestamps that
/// are missing or unparsable count as the epoch. Equal keys keep their list
/// order in either direction.
pub fn sort(records: &[Record], field: SortField, order: SortOrder) -> Vec<Record> {
    let mut sorted = records.to_vec();
    match (field, order) {
        (SortField::Name, SortOrder::Asc) => sorted.sort_by_cached_key(|r| r.name.to_lowercase()),
        (SortField::Name, SortOrder::Desc) => {
            sorted.sort_by_cached_key(|r| Reverse(r.name.to_lowercase()))
        }
        (SortField::Created, SortOrder::Asc) => sorted.sort_by_key(|r| r.created_or_epoch()),
        (SortField::Created, SortOrder::Desc) => {
            sorted.sort_by_key(|r| Reverse(r.created_or_epoch()))
        }
    }
    sorted
}

pub fn run<S: DataStore>(store: &S, field: &str, order: &str) -> Result<CmdResult> {
    let field: SortField = field.parse()?;
    let order: SortOrder = order.parse()?;
    let records = store.list_records()?;

    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info("Vault is empty. Nothing to sort."));
        return Ok(result);
    }

    result.add_message(CmdMessage::info(format!(
        "Sorted Records ({}, {}):",
        field, order
    )));
    Ok(result.with_listed_records(sort(&records, field, order)))
}
