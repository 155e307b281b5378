//! Diagnostics produced while turning loosely-typed input into records.

use std::fmt::{Display, Formatter};

/// Hard failure: the record cannot be constructed at all.
#[derive(Debug, thiserror::Error, Clone, Eq, PartialEq)]
pub enum RecordError {
    #[error("process date `{0}` is not a valid `YYYY-MM-DD` date")]
    InvalidProcessDate(String),

    #[error("timestamp `{0}` does not match any supported format")]
    InvalidTimestamp(String),
}

/// Soft problem with a single field: the record is still built, the field is dropped.
#[must_use]
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Issue {
    /// Name of the offending field or column.
    pub field: String,

    /// Raw text as it was supplied.
    pub text: String,

    pub reason: IssueReason,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum IssueReason {
    UnparsableTimestamp,
    UnparsableReading,
    UnknownEquipment,
}

impl Display for Issue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let reason = match self.reason {
            IssueReason::UnparsableTimestamp => "unparsable timestamp",
            IssueReason::UnparsableReading => "unparsable reading",
            IssueReason::UnknownEquipment => "unknown equipment",
        };
        write!(f, "{}: {reason} `{}`", self.field, self.text)
    }
}

impl Issue {
    pub fn new(field: impl Into<String>, text: impl Into<String>, reason: IssueReason) -> Self {
        Self { field: field.into(), text: text.into(), reason }
    }
}

/// Record together with the issues found while constructing it.
#[must_use]
#[derive(Debug)]
pub struct Validated<T> {
    pub value: T,
    pub issues: Vec<Issue>,
}

impl<T> Validated<T> {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
