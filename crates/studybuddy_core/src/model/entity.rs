//! Shared entity and patch contracts.

use crate::model::validation::ValidationError;

/// Integer identity shared by subjects, schedules and tasks.
///
/// Values are timestamp-shaped (epoch milliseconds) when assigned by the
/// default generator, but nothing depends on that shape.
pub type EntityId = i64;

/// Record stored in one of the document collections.
pub trait Entity: Clone {
    /// Collection name used in diagnostics and log events.
    const COLLECTION: &'static str;

    fn id(&self) -> EntityId;

    /// Checks field rules every stored record must satisfy, imported or not.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Stricter rules applied when the record is added or updated through the
    /// store. Defaults to [`Entity::validate`].
    fn validate_write(&self) -> Result<(), ValidationError> {
        self.validate()
    }
}

/// Partial field set merged over an existing entity.
///
/// Fields set on the patch win; unset fields keep the base value.
pub trait Patch<T> {
    fn is_empty(&self) -> bool;

    fn apply_to(&self, target: &mut T);
}
