//! Configuration management for storage and scheduling rules.

/// Rule table loading from TOML
pub mod rules;

/// Payment file location from environment variables
pub mod storage;

use crate::{core::schedule::RuleTable, errors::Result};
use std::path::PathBuf;
use tracing::info;

/// Environment variable naming an optional TOML rule file.
pub const RULES_PATH_VAR: &str = "PAYMENT_CALENDAR_RULES";

/// Settings the application starts with.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where the payment list is saved
    pub storage_path: PathBuf,
    /// Scheduling rules in effect
    pub rules: RuleTable,
}

/// Assembles the application configuration from the environment.
///
/// Uses the built-in rule table unless `PAYMENT_CALENDAR_RULES` points at a
/// rule file.
///
/// # Errors
/// Returns an error if a configured rule file cannot be loaded.
pub fn load_app_config() -> Result<AppConfig> {
    let storage_path = storage::get_storage_path();

    let rules = match std::env::var(RULES_PATH_VAR) {
        Ok(path) => {
            let table = rules::load_rules(&path)?;
            info!("Using rule table from {path}");
            table
        }
        Err(_) => {
            info!("Using built-in rule table");
            RuleTable::builtin()
        }
    };

    Ok(AppConfig {
        storage_path,
        rules,
    })
}
