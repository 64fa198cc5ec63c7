//! Core use-case services.
//!
//! # Responsibility
//! - Caller-side policies that sit above the document store (schedule
//!   conflict warnings).
//! - Read-only projections for dashboard, schedule and analytics views.

pub mod conflict;
pub mod overview_service;
pub mod schedule_service;
