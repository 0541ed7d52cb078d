//! Unified error types and result handling.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid amount: {amount} (must be a finite, non-negative number)")]
    InvalidAmount { amount: f64 },

    #[error("Payment not found: {id}")]
    PaymentNotFound { id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
