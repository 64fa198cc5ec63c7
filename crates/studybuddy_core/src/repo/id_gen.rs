//! Entity id assignment.
//!
//! # Invariants
//! - Ids returned by one generator strictly increase in call order.
//! - Returned ids are never below the caller-provided floor.
//! - Once `EntityId::MAX` has been issued the generator is exhausted and
//!   returns `None`.

use crate::model::entity::EntityId;
use chrono::Utc;

/// Source of fresh entity ids.
pub trait IdGenerator {
    /// Returns a fresh id that is `>= floor`, or `None` when ids are exhausted.
    ///
    /// Callers pass one past the largest id already in the target collection.
    fn next_id(&mut self, floor: EntityId) -> Option<EntityId>;
}

/// Timestamp-shaped ids: epoch milliseconds, bumped when the clock stalls.
pub struct ClockIdGenerator {
    now_ms: fn() -> EntityId,
    last: EntityId,
}

impl ClockIdGenerator {
    pub fn new() -> Self {
        Self::with_source(|| Utc::now().timestamp_millis())
    }

    /// Uses a custom millisecond source instead of the system clock.
    pub fn with_source(now_ms: fn() -> EntityId) -> Self {
        Self { now_ms, last: 0 }
    }
}

impl Default for ClockIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for ClockIdGenerator {
    fn next_id(&mut self, floor: EntityId) -> Option<EntityId> {
        let id = (self.now_ms)().max(self.last.checked_add(1)?).max(floor);
        self.last = id;
        Some(id)
    }
}

/// Counter ids starting at 1; deterministic for tests and fixtures.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    last: EntityId,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self, floor: EntityId) -> Option<EntityId> {
        let id = self.last.checked_add(1)?.max(floor);
        self.last = id;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::{ClockIdGenerator, IdGenerator, SequentialIdGenerator};

    #[test]
    fn clock_ids_increase_when_clock_stalls() {
        let mut ids = ClockIdGenerator::with_source(|| 1_700_000_000_000);
        let first = ids.next_id(0).unwrap();
        let second = ids.next_id(0).unwrap();
        let third = ids.next_id(0).unwrap();
        assert_eq!(first, 1_700_000_000_000);
        assert!(first < second && second < third);
    }

    #[test]
    fn clock_ids_respect_floor() {
        let mut ids = ClockIdGenerator::with_source(|| 10);
        assert_eq!(ids.next_id(500), Some(500));
        assert_eq!(ids.next_id(0), Some(501));
    }

    #[test]
    fn sequential_ids_count_from_one() {
        let mut ids = SequentialIdGenerator::new();
        assert_eq!(ids.next_id(0), Some(1));
        assert_eq!(ids.next_id(0), Some(2));
        assert_eq!(ids.next_id(10), Some(10));
        assert_eq!(ids.next_id(0), Some(11));
    }

    #[test]
    fn generators_stop_after_the_largest_id() {
        let mut clock = ClockIdGenerator::with_source(|| 10);
        assert_eq!(clock.next_id(i64::MAX), Some(i64::MAX));
        assert_eq!(clock.next_id(0), None);

        let mut sequential = SequentialIdGenerator::new();
        assert_eq!(sequential.next_id(i64::MAX), Some(i64::MAX));
        assert_eq!(sequential.next_id(0), None);
    }
}
