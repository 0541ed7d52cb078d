//! Storage location configuration.
//!
//! Resolves where the payment list is kept, from `PAYMENT_CALENDAR_STORAGE`
//! or a local default.

use std::path::PathBuf;

/// Environment variable naming the payment file.
pub const STORAGE_PATH_VAR: &str = "PAYMENT_CALENDAR_STORAGE";

/// Used when no storage path is configured.
pub const DEFAULT_STORAGE_PATH: &str = "data/payments.json";

/// Gets the payment file path from the environment, or the default.
#[must_use]
pub fn get_storage_path() -> PathBuf {
    std::env::var(STORAGE_PATH_VAR)
        .map_or_else(|_| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from)
}
