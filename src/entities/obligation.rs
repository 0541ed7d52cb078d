//! Obligation entity - System-generated reminders derived from the rule table.
//!
//! Obligations have the same shape as payments but are never stored. They are
//! regenerated on every query, and their identifiers are a pure function of
//! category and date so the same obligation always comes back with the same id.

use super::payment::{PaymentFields, PaymentStatus};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Namespace prefix shared by every obligation identifier.
pub const SYSTEM_ID_PREFIX: &str = "sys";

/// Kind of recurring obligation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObligationCategory {
    /// Invoice and billing-statement reception window
    Billing,
    /// Supplier payment execution window
    Payment,
    /// Named tax or legal due date, keyed by its rule
    Tax {
        /// Slug of the exact-date rule that produced it
        key: String,
    },
    /// Fixed day-of-month deliverable
    MonthlyDeliverable,
}

impl ObligationCategory {
    /// Tag embedded in the obligation identifier, e.g. `billing` or `tax-vat`.
    #[must_use]
    pub fn tag(&self) -> String {
        match self {
            Self::Billing => "billing".to_string(),
            Self::Payment => "payment".to_string(),
            Self::Tax { key } => format!("tax-{key}"),
            Self::MonthlyDeliverable => "monthly".to_string(),
        }
    }
}

/// Deterministic identifier of a synthetic obligation: `sys-<tag>-<YYYY-MM-DD>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ObligationId(String);

impl ObligationId {
    /// Builds the identifier for a category on a date.
    #[must_use]
    pub fn new(category: &ObligationCategory, date: NaiveDate) -> Self {
        Self(format!(
            "{SYSTEM_ID_PREFIX}-{}-{}",
            category.tag(),
            date.format("%Y-%m-%d")
        ))
    }

    /// Borrows the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObligationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rule-derived obligation for one calendar day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SyntheticObligation {
    /// Reproducible identifier in the system namespace
    pub id: ObligationId,
    /// Which rule kind produced it
    pub category: ObligationCategory,
    /// Day the obligation falls on
    pub date: NaiveDate,
    /// Free-text description taken from the rule
    pub description: String,
    /// Counterparty or responsible area taken from the rule
    pub recipient: String,
}

impl SyntheticObligation {
    /// Creates an obligation, deriving its identifier from category and date.
    pub fn new(
        category: ObligationCategory,
        date: NaiveDate,
        recipient: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ObligationId::new(&category, date),
            category,
            date,
            description: description.into(),
            recipient: recipient.into(),
        }
    }

    /// System obligations carry no monetary value.
    #[must_use]
    pub const fn amount(&self) -> f64 {
        0.0
    }

    /// System obligations have no completion state of their own.
    #[must_use]
    pub const fn status(&self) -> PaymentStatus {
        PaymentStatus::Pending
    }

    /// Copies the obligation into editable payment fields.
    #[must_use]
    pub fn to_fields(&self) -> PaymentFields {
        PaymentFields {
            date: self.date,
            description: self.description.clone(),
            recipient: self.recipient.clone(),
            amount: self.amount(),
            status: self.status(),
        }
    }
}
