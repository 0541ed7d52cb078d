//! Payment entity - A user-entered payment or collection on a calendar day.
//!
//! Payments are the only records that are ever persisted. Each one carries an
//! opaque identifier assigned at creation time that never changes afterwards.

use crate::errors::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a persisted payment.
///
/// Store-generated ids are UUID strings; ids loaded from storage are kept
/// verbatim, whatever their shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(String);

impl PaymentId {
    /// Wraps an existing identifier without checking it.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random identifier. Uniqueness against a particular store is
    /// the caller's job, see [`crate::core::store::PaymentStore::fresh_id`].
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrows the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Completion state of a payment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Still to be done
    #[default]
    Pending,
    /// Paid or collected
    Completed,
}

/// Everything about a payment except its identifier.
///
/// This is what a form submits: creating a payment and replacing an existing
/// one both take a full set of fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentFields {
    /// Calendar day the payment belongs to
    pub date: NaiveDate,
    /// Free-text description
    pub description: String,
    /// Counterparty name
    pub recipient: String,
    /// Non-negative amount; zero is a valid placeholder
    pub amount: f64,
    /// Pending or completed
    pub status: PaymentStatus,
}

impl PaymentFields {
    /// Blank pending fields for a given day, the starting point of a new form.
    #[must_use]
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            date,
            description: String::new(),
            recipient: String::new(),
            amount: 0.0,
            status: PaymentStatus::Pending,
        }
    }

    /// Checks the fields before they are allowed anywhere near the store.
    ///
    /// # Errors
    /// - `MissingField` when the description or recipient is blank
    /// - `InvalidAmount` when the amount is negative or not finite
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(Error::MissingField {
                field: "description",
            });
        }

        if self.recipient.trim().is_empty() {
            return Err(Error::MissingField { field: "recipient" });
        }

        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidAmount {
                amount: self.amount,
            });
        }

        Ok(())
    }
}

/// A persisted payment record.
///
/// The serialized shape (`id`, `date`, `description`, `recipient`, `amount`,
/// `status`) is the storage format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique within the store, immutable after creation
    pub id: PaymentId,
    /// Calendar day the payment belongs to
    pub date: NaiveDate,
    /// Free-text description
    pub description: String,
    /// Counterparty name
    pub recipient: String,
    /// Non-negative amount
    pub amount: f64,
    /// Pending or completed
    pub status: PaymentStatus,
}

impl Payment {
    /// Builds a payment from an identifier and a set of fields.
    #[must_use]
    pub fn from_fields(id: PaymentId, fields: PaymentFields) -> Self {
        Self {
            id,
            date: fields.date,
            description: fields.description,
            recipient: fields.recipient,
            amount: fields.amount,
            status: fields.status,
        }
    }

    /// Copies out everything but the identifier.
    #[must_use]
    pub fn fields(&self) -> PaymentFields {
        PaymentFields {
            date: self.date,
            description: self.description.clone(),
            recipient: self.recipient.clone(),
            amount: self.amount,
            status: self.status,
        }
    }

    /// Replaces every field except the identifier.
    pub fn apply(&mut self, fields: PaymentFields) {
        self.date = fields.date;
        self.description = fields.description;
        self.recipient = fields.recipient;
        self.amount = fields.amount;
        self.status = fields.status;
    }

    /// Whether the payment has been marked as done.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}
