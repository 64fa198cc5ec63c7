//! Core domain logic for StudyBuddy.
//! This crate is the single source of truth for the study document and its
//! invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod reminder;
pub mod repo;
pub mod service;

pub use logging::{init_logging, logging_status, LogConfig, LogLevel, LoggingError};
pub use model::clock::ClockTime;
pub use model::document::{Document, DocumentError};
pub use model::entity::{Entity, EntityId, Patch};
pub use model::schedule::{NewSchedule, Schedule, SchedulePatch};
pub use model::settings::{Settings, SettingsPatch, Theme};
pub use model::subject::{NewSubject, Priority, Subject, SubjectPatch, DEFAULT_SUBJECT_COLOR};
pub use model::task::{NewTask, Task, TaskKind, TaskPatch};
pub use model::validation::ValidationError;
pub use reminder::checker::{evaluate, Clock, ReminderChecker, SystemClock};
pub use reminder::notifier::{
    deliver, prepare_notifications, Delivery, Notifier, Permission, Reminder,
};
pub use reminder::poller::{ReminderPoller, POLL_INTERVAL};
pub use repo::document_store::{DocumentStore, StoreError, StoreResult, STORAGE_KEY};
pub use repo::id_gen::{ClockIdGenerator, IdGenerator, SequentialIdGenerator};
pub use repo::kv_repo::{KvStorage, MemoryKvStorage, SqliteKvStorage, StorageError};
pub use service::conflict::{find_conflicts, has_conflict};
pub use service::schedule_service::{ScheduleSaveOutcome, ScheduleService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
