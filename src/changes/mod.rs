//! Change-feed summaries.
//!
//! A database change feed delivers batches of [`EmployeeChange`] events.
//! [`summarize`] reduces a batch to per-operation counts; the HTTP adapter
//! logs the result one line per operation.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::employees::Employee;

/// Kind of row change reported by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "OperationRepr")]
pub enum ChangeOperation {
    Insert,
    Update,
    Delete,
}

/// Wire forms accepted for an operation: its name or the feed's numeric code.
#[derive(Deserialize)]
#[serde(untagged)]
enum OperationRepr {
    Code(u8),
    Name(String),
}

impl TryFrom<OperationRepr> for ChangeOperation {
    type Error = String;

    fn try_from(repr: OperationRepr) -> Result<Self, Self::Error> {
        match repr {
            OperationRepr::Code(0) => Ok(Self::Insert),
            OperationRepr::Code(1) => Ok(Self::Update),
            OperationRepr::Code(2) => Ok(Self::Delete),
            OperationRepr::Code(code) => Err(format!("unknown change operation code {}", code)),
            OperationRepr::Name(name) => match name.as_str() {
                "Insert" => Ok(Self::Insert),
                "Update" => Ok(Self::Update),
                "Delete" => Ok(Self::Delete),
                other => Err(format!("unknown change operation '{}'", other)),
            },
        }
    }
}

/// A single change-feed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeChange {
    #[serde(alias = "Operation")]
    pub operation: ChangeOperation,
    #[serde(alias = "Item")]
    pub item: Employee,
}

impl EmployeeChange {
    pub fn new(operation: ChangeOperation, item: Employee) -> Self {
        Self { operation, item }
    }
}

/// Count of one operation kind within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tally {
    Count(usize),
    NoChanges,
}

impl Tally {
    fn from_count(count: usize) -> Self {
        if count > 0 {
            Self::Count(count)
        } else {
            Self::NoChanges
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{}", n),
            Self::NoChanges => f.write_str("No Changes"),
        }
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Count(n) => serializer.serialize_u64(*n as u64),
            Self::NoChanges => serializer.serialize_str("No Changes"),
        }
    }
}

/// Per-operation tallies for one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangeSummary {
    #[serde(rename = "Inserted")]
    pub inserted: Tally,
    #[serde(rename = "Updated")]
    pub updated: Tally,
    #[serde(rename = "Deleted")]
    pub deleted: Tally,
}

impl ChangeSummary {
    /// Summary entries in report order.
    pub fn entries(&self) -> [(&'static str, Tally); 3] {
        [
            ("Inserted", self.inserted),
            ("Updated", self.updated),
            ("Deleted", self.deleted),
        ]
    }

    /// One `"{key} - {value}"` line per entry.
    pub fn lines(&self) -> Vec<String> {
        self.entries()
            .iter()
            .map(|(key, tally)| format!("{} - {}", key, tally))
            .collect()
    }
}

/// Tally a batch of change events.
pub fn summarize(changes: &[EmployeeChange]) -> ChangeSummary {
    let count = |op: ChangeOperation| changes.iter().filter(|c| c.operation == op).count();

    ChangeSummary {
        inserted: Tally::from_count(count(ChangeOperation::Insert)),
        updated: Tally::from_count(count(ChangeOperation::Update)),
        deleted: Tally::from_count(count(ChangeOperation::Delete)),
    }
}
