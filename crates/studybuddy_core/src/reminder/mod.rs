//! Daily study reminders.
//!
//! # Responsibility
//! - Decide, once per poll, whether the configured reminder minute has come.
//! - Summarize incomplete tasks due today into a notification message.
//! - Hand delivery to a host [`notifier::Notifier`], falling back to an alert.
//!
//! # Invariants
//! - Nothing is evaluated while reminders are disabled.
//! - A given (date, minute) fires at most once per checker.

pub mod checker;
pub mod notifier;
pub mod poller;
