//! Shared test utilities for the payment calendar.
//!
//! Helpers for building dates, form fields and calendars with sensible
//! defaults.

#![allow(clippy::expect_used)]

use crate::{
    core::{calendar::PaymentCalendar, persistence::MemoryStorage, schedule::RuleTable},
    entities::{PaymentFields, PaymentStatus},
};
use chrono::NaiveDate;

/// Builds a date, panicking on an impossible one.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Creates pending payment fields with sensible defaults.
///
/// # Defaults
/// * `description`: `"Test payment"`
/// * `status`: pending
pub fn test_fields(date: NaiveDate, recipient: &str, amount: f64) -> PaymentFields {
    PaymentFields {
        date,
        description: "Test payment".to_string(),
        recipient: recipient.to_string(),
        amount,
        status: PaymentStatus::Pending,
    }
}

/// A calendar with the built-in rules and empty in-memory storage.
/// This is the standard setup for calendar tests.
pub fn setup_calendar() -> PaymentCalendar<MemoryStorage> {
    PaymentCalendar::open(RuleTable::builtin(), MemoryStorage::new())
}
