use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type RecordId = u64;

/// A creation timestamp as found in storage.
///
/// New records always carry a `Valid` instant. Data files written by hand or
/// by older versions may hold text that does not parse; that text is kept
/// verbatim so it survives a save, but every ordering and statistic treats
/// it as if no timestamp was present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Valid(DateTime<Utc>),
    Invalid(String),
}

impl Timestamp {
    pub fn now() -> Self {
        Timestamp::Valid(Utc::now())
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Valid(dt) => Some(*dt),
            Timestamp::Invalid(_) => None,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Valid(dt) => {
                write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Timestamp::Invalid(raw) => write!(f, "{}", raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
}

impl Record {
    pub fn new(id: RecordId, name: String, value: String) -> Self {
        Self {
            id,
            name,
            value,
            created: Some(Timestamp::now()),
        }
    }

    /// The creation instant, if one was recorded and parses.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.as_ref().and_then(Timestamp::as_datetime)
    }

    /// Creation instant with missing or unparsable values pinned to the epoch.
    pub fn created_or_epoch(&self) -> DateTime<Utc> {
        self.created_at().unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Text used wherever a record's creation time is printed.
    pub fn created_label(&self) -> String {
        self.created
            .as_ref()
            .map(|ts| ts.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}
