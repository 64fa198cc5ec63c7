//! Field validation errors for study records.

use crate::model::entity::EntityId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rule violated by a record or document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Subject name is empty after trim.
    BlankSubjectName,
    /// Task title is empty after trim.
    BlankTaskTitle,
    /// Subject color is not `#RGB` or `#RRGGBB`.
    InvalidColor(String),
    /// Time text is not zero-padded 24-hour `HH:MM`.
    InvalidTime(String),
    /// Schedule end is not strictly after its start.
    InvalidTimeRange { start: String, end: String },
    /// Two records in one collection share an id.
    DuplicateId {
        collection: &'static str,
        id: EntityId,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankSubjectName => write!(f, "subject name must not be blank"),
            Self::BlankTaskTitle => write!(f, "task title must not be blank"),
            Self::InvalidColor(value) => write!(f, "invalid subject color `{value}`"),
            Self::InvalidTime(value) => write!(f, "invalid time `{value}`; expected HH:MM"),
            Self::InvalidTimeRange { start, end } => {
                write!(f, "schedule end {end} must be after start {start}")
            }
            Self::DuplicateId { collection, id } => {
                write!(f, "duplicate id {id} in {collection}")
            }
        }
    }
}

impl Error for ValidationError {}
