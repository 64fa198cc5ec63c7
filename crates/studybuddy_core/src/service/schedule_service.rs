//! Schedule save workflow.
//!
//! # Responsibility
//! - Run the advisory conflict check before a schedule is added or edited.
//! - Let the caller decide whether to proceed when conflicts exist.
//!
//! # Invariants
//! - Conflicts never block a save by themselves; only a declining caller does.
//! - `confirm` is invoked only when at least one conflict exists.

use crate::model::entity::EntityId;
use crate::model::schedule::{NewSchedule, Schedule, SchedulePatch};
use crate::repo::document_store::{DocumentStore, StoreResult};
use crate::repo::id_gen::IdGenerator;
use crate::repo::kv_repo::KvStorage;
use crate::service::conflict::find_conflicts;
use log::info;

/// Result of [`ScheduleService::save_schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSaveOutcome {
    /// New schedule stored with this id.
    Added(EntityId),
    /// Edit applied; `found == false` means the edited id no longer exists.
    Updated { found: bool },
    /// Caller declined after seeing conflicts; nothing was written.
    Declined,
}

/// Use-case service for creating and editing schedules.
pub struct ScheduleService<'s, S: KvStorage, G: IdGenerator> {
    store: &'s mut DocumentStore<S, G>,
}

impl<'s, S: KvStorage, G: IdGenerator> ScheduleService<'s, S, G> {
    pub fn new(store: &'s mut DocumentStore<S, G>) -> Self {
        Self { store }
    }

    /// Returns stored schedules overlapping `draft`, excluding `editing`.
    pub fn conflicts_for(
        &self,
        draft: &NewSchedule,
        editing: Option<EntityId>,
    ) -> StoreResult<Vec<Schedule>> {
        let schedules = self.store.schedules()?;
        Ok(find_conflicts(draft, editing, &schedules)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Adds `draft` (or applies it over `editing`) unless conflicts exist and
    /// `confirm` returns `false`.
    pub fn save_schedule(
        &mut self,
        draft: NewSchedule,
        editing: Option<EntityId>,
        confirm: impl FnOnce(&[Schedule]) -> bool,
    ) -> StoreResult<ScheduleSaveOutcome> {
        let conflicts = self.conflicts_for(&draft, editing)?;
        if !conflicts.is_empty() {
            info!(
                "event=schedule_conflict module=service status=warn date={} conflicts={}",
                draft.date,
                conflicts.len()
            );
            if !confirm(&conflicts) {
                return Ok(ScheduleSaveOutcome::Declined);
            }
        }

        match editing {
            Some(id) => {
                let found = self
                    .store
                    .update_schedule(id, &SchedulePatch::from(&draft))?;
                Ok(ScheduleSaveOutcome::Updated { found })
            }
            None => Ok(ScheduleSaveOutcome::Added(self.store.add_schedule(draft)?)),
        }
    }
}
