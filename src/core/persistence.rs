//! Persistence hook for the payment list.
//!
//! The calendar hands the full list of payments to a [`PaymentSink`] after
//! every mutation and asks it once for the saved list at startup. The stored
//! form is a JSON array of payment objects. There is no schema versioning: a
//! missing or malformed blob loads as an empty list and is never fatal.

use crate::{entities::Payment, errors::Result};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Durable storage for the payment list.
pub trait PaymentSink {
    /// Reads the saved list. Missing or unreadable data yields an empty list.
    fn load(&self) -> Vec<Payment>;

    /// Overwrites the saved list with `payments`.
    ///
    /// # Errors
    /// Returns an error when the list cannot be encoded or written.
    fn save(&mut self, payments: &[Payment]) -> Result<()>;
}

/// Encodes payments into the storage format.
///
/// # Errors
/// Returns `Error::Serialization` if encoding fails.
pub fn encode_payments(payments: &[Payment]) -> Result<String> {
    Ok(serde_json::to_string_pretty(payments)?)
}

/// Decodes the storage format, treating malformed input as an empty list.
#[must_use]
pub fn decode_payments(blob: &str) -> Vec<Payment> {
    match serde_json::from_str(blob) {
        Ok(payments) => payments,
        Err(e) => {
            warn!("Persisted payments are malformed, starting empty: {e}");
            Vec::new()
        }
    }
}

/// Stores the payment list as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PaymentSink for JsonFileStorage {
    fn load(&self) -> Vec<Payment> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => {
                let payments = decode_payments(&blob);
                info!(
                    "Loaded {} payments from {}",
                    payments.len(),
                    self.path.display()
                );
                payments
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "No payment file at {}, starting empty",
                    self.path.display()
                );
                Vec::new()
            }
            Err(e) => {
                warn!(
                    "Failed to read payment file {}, starting empty: {e}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    fn save(&mut self, payments: &[Payment]) -> Result<()> {
        let blob = encode_payments(payments)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, blob)?;
        debug!(
            "Saved {} payments to {}",
            payments.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Keeps the encoded payment list in memory.
///
/// Useful wherever a real file is unwanted; it still goes through the same
/// encoding as [`JsonFileStorage`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blob: Option<String>,
    saves: usize,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing encoded blob, well-formed or not.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            saves: 0,
        }
    }

    /// The last saved blob, if any.
    #[must_use]
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// Number of successful saves so far.
    #[must_use]
    pub const fn saves(&self) -> usize {
        self.saves
    }
}

impl PaymentSink for MemoryStorage {
    fn load(&self) -> Vec<Payment> {
        self.blob.as_deref().map(decode_payments).unwrap_or_default()
    }

    fn save(&mut self, payments: &[Payment]) -> Result<()> {
        self.blob = Some(encode_payments(payments)?);
        self.saves += 1;
        Ok(())
    }
}
