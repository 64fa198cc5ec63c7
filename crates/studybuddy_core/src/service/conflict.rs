//! Advisory overlap detection for schedules.
//!
//! Two slots on the same date conflict when their half-open intervals
//! `[start, end)` intersect; back-to-back slots do not.

use crate::model::entity::EntityId;
use crate::model::schedule::{NewSchedule, Schedule};

/// Returns existing schedules that overlap `candidate`.
///
/// `editing` excludes the schedule being edited from the comparison.
pub fn find_conflicts<'a>(
    candidate: &NewSchedule,
    editing: Option<EntityId>,
    existing: &'a [Schedule],
) -> Vec<&'a Schedule> {
    existing
        .iter()
        .filter(|other| other.date == candidate.date && Some(other.id) != editing)
        .filter(|other| {
            candidate.start_time < other.end_time && candidate.end_time > other.start_time
        })
        .collect()
}

/// Whether `candidate` overlaps any other schedule on its date.
pub fn has_conflict(
    candidate: &NewSchedule,
    editing: Option<EntityId>,
    existing: &[Schedule],
) -> bool {
    !find_conflicts(candidate, editing, existing).is_empty()
}
