//! Aggregate study document.
//!
//! # Responsibility
//! - Hold the four top-level collections persisted as one JSON blob.
//! - Parse and serialize the blob, validating cross-record invariants.
//!
//! # Invariants
//! - A parsed document has unique ids per collection and valid records.
//! - Collections keep insertion order.

use crate::model::entity::Entity;
use crate::model::schedule::Schedule;
use crate::model::settings::Settings;
use crate::model::subject::Subject;
use crate::model::task::Task;
use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Whole persisted state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub subjects: Vec<Subject>,
    pub schedules: Vec<Schedule>,
    pub tasks: Vec<Task>,
    pub settings: Settings,
}

/// Reason a text blob could not become a [`Document`].
#[derive(Debug)]
pub enum DocumentError {
    Json(serde_json::Error),
    Validation(ValidationError),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed document json: {err}"),
            Self::Validation(err) => write!(f, "invalid document: {err}"),
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<ValidationError> for DocumentError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl Document {
    /// Parses document text and validates every record.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let document: Document = serde_json::from_str(text)?;
        document.validate()?;
        Ok(document)
    }

    /// Compact form written to storage.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Human-readable form used by export.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_collection(&self.subjects)?;
        validate_collection(&self.schedules)?;
        validate_collection(&self.tasks)?;
        Ok(())
    }
}

fn validate_collection<T: Entity>(items: &[T]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        item.validate()?;
        if !seen.insert(item.id()) {
            return Err(ValidationError::DuplicateId {
                collection: T::COLLECTION,
                id: item.id(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Document, DocumentError};
    use crate::model::validation::ValidationError;

    const SAMPLE: &str = r##"{
        "subjects": [{"id": 1, "name": "Math", "color": "#4CAF50", "priority": "high"}],
        "schedules": [{"id": 2, "subjectId": 1, "date": "2024-01-10", "startTime": "09:00", "endTime": "10:00"}],
        "tasks": [{"id": 3, "subjectId": 1, "title": "Sheet 1", "type": "homework", "deadline": "2024-01-12", "completed": false}],
        "settings": {"theme": "dark", "remindersEnabled": false, "reminderTime": "20:15"}
    }"##;

    #[test]
    fn parse_accepts_schema_document() {
        let document = Document::parse(SAMPLE).expect("sample should parse");
        assert_eq!(document.subjects.len(), 1);
        assert_eq!(document.schedules[0].start_time.to_string(), "09:00");
        assert_eq!(document.tasks[0].title, "Sheet 1");
        assert!(!document.settings.reminders_enabled);
    }

    #[test]
    fn parse_rejects_missing_collections() {
        let err = Document::parse(r#"{"subjects": []}"#).unwrap_err();
        assert!(matches!(err, DocumentError::Json(_)));
    }

    #[test]
    fn parse_rejects_duplicate_ids() {
        let text = r##"{
            "subjects": [
                {"id": 1, "name": "A", "color": "#fff", "priority": "low"},
                {"id": 1, "name": "B", "color": "#000", "priority": "low"}
            ],
            "schedules": [], "tasks": [],
            "settings": {"theme": "light", "remindersEnabled": true, "reminderTime": "09:00"}
        }"##;
        let err = Document::parse(text).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Validation(ValidationError::DuplicateId { id: 1, .. })
        ));
    }

    #[test]
    fn pretty_json_round_trips() {
        let document = Document::parse(SAMPLE).unwrap();
        let text = document.to_pretty_json().unwrap();
        assert!(text.contains('\n'));
        assert_eq!(Document::parse(&text).unwrap(), document);
    }
}
