//! Schedule (class occurrence) record.
//!
//! # Invariants
//! - Adds and updates require `end_time` strictly after `start_time`;
//!   imported schedules are kept as written.
//! - `subject_id` may point at a deleted subject.

use crate::model::clock::ClockTime;
use crate::model::entity::{Entity, EntityId, Patch};
use crate::model::validation::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One class occurrence on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: EntityId,
    pub subject_id: EntityId,
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

/// Schedule fields supplied by callers before an id is assigned.
///
/// Also used as the candidate slot for conflict checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchedule {
    pub subject_id: EntityId,
    pub date: NaiveDate,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

impl NewSchedule {
    pub fn new(
        subject_id: EntityId,
        date: NaiveDate,
        start_time: ClockTime,
        end_time: ClockTime,
    ) -> Self {
        Self {
            subject_id,
            date,
            start_time,
            end_time,
        }
    }

    pub(crate) fn into_schedule(self, id: EntityId) -> Schedule {
        Schedule {
            id,
            subject_id: self.subject_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// Shallow-merge patch for [`Schedule`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulePatch {
    pub subject_id: Option<EntityId>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<ClockTime>,
    pub end_time: Option<ClockTime>,
}

impl From<&NewSchedule> for SchedulePatch {
    fn from(value: &NewSchedule) -> Self {
        Self {
            subject_id: Some(value.subject_id),
            date: Some(value.date),
            start_time: Some(value.start_time),
            end_time: Some(value.end_time),
        }
    }
}

impl Entity for Schedule {
    const COLLECTION: &'static str = "schedules";

    fn id(&self) -> EntityId {
        self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    fn validate_write(&self) -> Result<(), ValidationError> {
        if self.end_time <= self.start_time {
            return Err(ValidationError::InvalidTimeRange {
                start: self.start_time.to_string(),
                end: self.end_time.to_string(),
            });
        }
        Ok(())
    }
}

impl Patch<Schedule> for SchedulePatch {
    fn is_empty(&self) -> bool {
        self.subject_id.is_none()
            && self.date.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
    }

    fn apply_to(&self, target: &mut Schedule) {
        if let Some(subject_id) = self.subject_id {
            target.subject_id = subject_id;
        }
        if let Some(date) = self.date {
            target.date = date;
        }
        if let Some(start_time) = self.start_time {
            target.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            target.end_time = end_time;
        }
    }
}
