//! Rule table loading from a TOML file.
//!
//! The built-in schedule is used unless a rule file is configured. A rule file
//! replaces the built-in table entirely and must pass
//! [`RuleTable::validate`] before it is used.

use crate::{
    core::schedule::RuleTable,
    errors::{Error, Result},
};
use std::path::Path;

/// Loads and validates a rule table from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid or fields have the wrong shape
/// - The table fails validation
pub fn load_rules<P: AsRef<Path>>(path: P) -> Result<RuleTable> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading rule table from: {:?}", path_ref);

    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read rule file {}: {e}", path_ref.display()),
    })?;

    parse_rules(&contents)
}

/// Parses and validates a rule table from TOML text.
///
/// # Errors
/// Returns `Error::Config` when the text is not a valid rule table.
pub fn parse_rules(contents: &str) -> Result<RuleTable> {
    let rules: RuleTable = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse rule table: {e}"),
    })?;
    rules.validate()?;
    Ok(rules)
}
