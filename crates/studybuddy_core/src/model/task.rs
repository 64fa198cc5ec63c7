//! Task (deadline) record.

use crate::model::entity::{Entity, EntityId, Patch};
use crate::model::validation::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Kind of study work a task represents.
///
/// Stored as a free-form label; labels outside the known set survive a load
/// and save unchanged as [`TaskKind::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskKind {
    Homework,
    Assignment,
    Exam,
    Project,
    Reading,
    Other,
    Custom(String),
}

impl TaskKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Homework => "homework",
            Self::Assignment => "assignment",
            Self::Exam => "exam",
            Self::Project => "project",
            Self::Reading => "reading",
            Self::Other => "other",
            Self::Custom(label) => label,
        }
    }
}

impl Display for TaskKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TaskKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "homework" => Self::Homework,
            "assignment" => Self::Assignment,
            "exam" => Self::Exam,
            "project" => Self::Project,
            "reading" => Self::Reading,
            "other" => Self::Other,
            _ => Self::Custom(value),
        }
    }
}

impl From<TaskKind> for String {
    fn from(value: TaskKind) -> Self {
        match value {
            TaskKind::Custom(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// A task with a deadline date and completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    pub subject_id: EntityId,
    /// Serialized as `type` to match the document schema.
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub deadline: NaiveDate,
    pub completed: bool,
}

/// Task fields supplied by callers before an id is assigned.
///
/// There is no completion flag here: new tasks always start incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub subject_id: EntityId,
    pub kind: TaskKind,
    pub deadline: NaiveDate,
}

impl NewTask {
    pub fn new(
        title: impl Into<String>,
        subject_id: EntityId,
        kind: TaskKind,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            subject_id,
            kind,
            deadline,
        }
    }

    pub(crate) fn into_task(self, id: EntityId) -> Task {
        Task {
            id,
            title: self.title,
            subject_id: self.subject_id,
            kind: self.kind,
            deadline: self.deadline,
            completed: false,
        }
    }
}

/// Shallow-merge patch for [`Task`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub subject_id: Option<EntityId>,
    pub kind: Option<TaskKind>,
    pub deadline: Option<NaiveDate>,
    pub completed: Option<bool>,
}

impl Task {
    /// Incomplete and due exactly on `date`.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        !self.completed && self.deadline == date
    }

    /// Incomplete and due on `date` or later.
    pub fn is_upcoming(&self, date: NaiveDate) -> bool {
        !self.completed && self.deadline >= date
    }
}

impl Entity for Task {
    const COLLECTION: &'static str = "tasks";

    fn id(&self) -> EntityId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankTaskTitle);
        }
        Ok(())
    }
}

impl Patch<Task> for TaskPatch {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subject_id.is_none()
            && self.kind.is_none()
            && self.deadline.is_none()
            && self.completed.is_none()
    }

    fn apply_to(&self, target: &mut Task) {
        if let Some(title) = &self.title {
            target.title = title.clone();
        }
        if let Some(subject_id) = self.subject_id {
            target.subject_id = subject_id;
        }
        if let Some(kind) = &self.kind {
            target.kind = kind.clone();
        }
        if let Some(deadline) = self.deadline {
            target.deadline = deadline;
        }
        if let Some(completed) = self.completed {
            target.completed = completed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NewTask, TaskKind};
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn new_task_starts_incomplete() {
        let task = NewTask::new("Essay", 1, TaskKind::Homework, date(10)).into_task(5);
        assert!(!task.completed);
        assert_eq!(task.id, 5);
    }

    #[test]
    fn due_and_upcoming_ignore_completed_tasks() {
        let mut task = NewTask::new("Quiz", 1, TaskKind::Exam, date(10)).into_task(1);
        assert!(task.is_due_on(date(10)));
        assert!(task.is_upcoming(date(9)));
        assert!(!task.is_upcoming(date(11)));

        task.completed = true;
        assert!(!task.is_due_on(date(10)));
        assert!(!task.is_upcoming(date(9)));
    }

    #[test]
    fn kind_serializes_under_type_key() {
        let task = NewTask::new("Ch. 3", 2, TaskKind::Reading, date(3)).into_task(9);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["type"], "reading");
        assert_eq!(json["subjectId"], 2);
        assert_eq!(json["deadline"], "2024-01-03");
    }

    #[test]
    fn unknown_kind_label_is_kept_verbatim() {
        let kind: TaskKind = serde_json::from_str("\"quiz\"").unwrap();
        assert_eq!(kind, TaskKind::Custom("quiz".to_string()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"quiz\"");

        let known: TaskKind = serde_json::from_str("\"exam\"").unwrap();
        assert_eq!(known, TaskKind::Exam);
    }
}
