//! Subject record.

use crate::model::entity::{Entity, EntityId, Patch};
use crate::model::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid color regex")
});

/// Color preselected for new subjects by the original UI.
pub const DEFAULT_SUBJECT_COLOR: &str = "#4CAF50";

/// Study priority of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A subject that schedules and tasks refer to by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: EntityId,
    pub name: String,
    /// CSS hex color, `#RGB` or `#RRGGBB`.
    pub color: String,
    pub priority: Priority,
}

/// Subject fields supplied by callers before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
    pub name: String,
    pub color: String,
    pub priority: Priority,
}

impl NewSubject {
    pub fn new(name: impl Into<String>, color: impl Into<String>, priority: Priority) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            priority,
        }
    }

    pub(crate) fn into_subject(self, id: EntityId) -> Subject {
        Subject {
            id,
            name: self.name,
            color: self.color,
            priority: self.priority,
        }
    }
}

/// Shallow-merge patch for [`Subject`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub priority: Option<Priority>,
}

impl Entity for Subject {
    const COLLECTION: &'static str = "subjects";

    fn id(&self) -> EntityId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankSubjectName);
        }
        if !HEX_COLOR_RE.is_match(&self.color) {
            return Err(ValidationError::InvalidColor(self.color.clone()));
        }
        Ok(())
    }
}

impl Patch<Subject> for SubjectPatch {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.priority.is_none()
    }

    fn apply_to(&self, target: &mut Subject) {
        if let Some(name) = &self.name {
            target.name = name.clone();
        }
        if let Some(color) = &self.color {
            target.color = color.clone();
        }
        if let Some(priority) = self.priority {
            target.priority = priority;
        }
    }
}
