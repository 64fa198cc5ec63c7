//! Study document domain model.
//!
//! # Responsibility
//! - Define the canonical records persisted inside the study document.
//! - Provide shallow-merge patches and field validation for each record.
//!
//! # Invariants
//! - Every entity is identified by an `EntityId` unique within its collection.
//! - Patches never carry an id, so identity cannot be reassigned by a merge.

pub mod clock;
pub mod document;
pub mod entity;
pub mod schedule;
pub mod settings;
pub mod subject;
pub mod task;
pub mod validation;
