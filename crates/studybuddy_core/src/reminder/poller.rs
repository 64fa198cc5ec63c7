//! Fixed-interval reminder polling loop.
//!
//! # Invariants
//! - Ticks are aligned to multiples of the interval counted from local
//!   midnight, so time spent polling never accumulates into drift.

use crate::reminder::checker::{Clock, ReminderChecker};
use crate::reminder::notifier::{Delivery, Notifier};
use crate::repo::document_store::{DocumentStore, StoreResult};
use crate::repo::id_gen::IdGenerator;
use crate::repo::kv_repo::KvStorage;
use chrono::{NaiveDateTime, Timelike};
use log::{error, info};
use std::time::Duration;

/// Period between reminder checks.
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Drives a [`ReminderChecker`] from a [`Clock`].
pub struct ReminderPoller<C: Clock> {
    checker: ReminderChecker,
    clock: C,
    interval: Duration,
}

impl<C: Clock> ReminderPoller<C> {
    pub fn new(clock: C) -> Self {
        Self::with_interval(clock, POLL_INTERVAL)
    }

    pub fn with_interval(clock: C, interval: Duration) -> Self {
        Self {
            checker: ReminderChecker::new(),
            clock,
            interval,
        }
    }

    /// Runs one check at the clock's current time.
    pub fn poll_once<S: KvStorage, G: IdGenerator>(
        &mut self,
        store: &DocumentStore<S, G>,
        notifier: &dyn Notifier,
    ) -> StoreResult<Option<Delivery>> {
        let now = self.clock.now();
        self.checker.tick(store, now, notifier)
    }

    /// Polls on every interval boundary while `keep_running` returns `true`.
    ///
    /// A store failure ends the loop and is returned to the caller.
    pub fn run<S: KvStorage, G: IdGenerator>(
        &mut self,
        store: &DocumentStore<S, G>,
        notifier: &dyn Notifier,
        mut keep_running: impl FnMut() -> bool,
    ) -> StoreResult<()> {
        info!(
            "event=reminder_poll module=reminder status=start interval_s={}",
            self.interval.as_secs()
        );
        while keep_running() {
            if let Err(err) = self.poll_once(store, notifier) {
                error!("event=reminder_poll module=reminder status=error error={err}");
                return Err(err);
            }
            std::thread::sleep(self.until_next_tick(self.clock.now()));
        }
        info!("event=reminder_poll module=reminder status=stop");
        Ok(())
    }

    /// Time left from `now` until the next interval boundary.
    fn until_next_tick(&self, now: NaiveDateTime) -> Duration {
        let period = self.interval.as_millis();
        if period == 0 {
            return Duration::ZERO;
        }
        let since_midnight = u128::from(now.num_seconds_from_midnight()) * 1000
            + u128::from(now.nanosecond() / 1_000_000);
        let remaining = period - since_midnight % period;
        Duration::from_millis(u64::try_from(remaining).unwrap_or(u64::MAX))
    }
}
