//! Core business logic - framework-agnostic scheduling, storage and reporting.

/// Calendar facade merging stored payments with derived obligations
pub mod calendar;
/// Month page layout
pub mod month;
/// Rule-based obligation derivation
pub mod obligations;
/// Persistence hook and storage backends
pub mod persistence;
/// Summary statistics
pub mod report;
/// Recurrence rule table
pub mod schedule;
/// In-memory payment store
pub mod store;
