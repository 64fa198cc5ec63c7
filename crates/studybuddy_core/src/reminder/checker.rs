//! Reminder decision logic.
//!
//! # Invariants
//! - Disabled reminders short-circuit before any time comparison.
//! - Matching is exact-minute equality against `settings.reminder_time`.
//! - "Today" is the local calendar date of the same `now` used for matching.

use crate::model::clock::ClockTime;
use crate::model::settings::Settings;
use crate::model::task::Task;
use crate::reminder::notifier::{deliver, Delivery, Notifier, Reminder};
use crate::repo::document_store::{DocumentStore, StoreResult};
use crate::repo::id_gen::IdGenerator;
use crate::repo::kv_repo::KvStorage;
use chrono::{Local, NaiveDate, NaiveDateTime};
use log::debug;

/// Wall-clock source in host local time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the operating system local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Returns the reminder due at `now`, if any.
///
/// Pure: no deduplication, see [`ReminderChecker`] for that.
pub fn evaluate(settings: &Settings, tasks: &[Task], now: NaiveDateTime) -> Option<Reminder> {
    if !settings.reminders_enabled {
        return None;
    }
    if ClockTime::of(&now.time()) != settings.reminder_time {
        return None;
    }

    let today = now.date();
    let due_today = tasks.iter().filter(|task| task.is_due_on(today)).count();
    Some(Reminder::for_due_count(due_today))
}

/// Stateful checker that fires each (date, minute) at most once.
#[derive(Debug, Default)]
pub struct ReminderChecker {
    last_fired: Option<(NaiveDate, ClockTime)>,
}

impl ReminderChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(
        &mut self,
        settings: &Settings,
        tasks: &[Task],
        now: NaiveDateTime,
    ) -> Option<Reminder> {
        let reminder = evaluate(settings, tasks, now)?;
        let slot = (now.date(), ClockTime::of(&now.time()));
        if self.last_fired == Some(slot) {
            debug!("event=reminder_check module=reminder status=skipped reason=already_fired");
            return None;
        }
        self.last_fired = Some(slot);
        Some(reminder)
    }

    /// Reads settings and tasks from `store`, then delivers a due reminder.
    pub fn tick<S: KvStorage, G: IdGenerator>(
        &mut self,
        store: &DocumentStore<S, G>,
        now: NaiveDateTime,
        notifier: &dyn Notifier,
    ) -> StoreResult<Option<Delivery>> {
        let document = store.snapshot()?;
        Ok(self
            .check(&document.settings, &document.tasks, now)
            .map(|reminder| deliver(notifier, &reminder)))
    }
}
