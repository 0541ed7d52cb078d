//! Calendar entry - Either a persisted payment or a synthetic obligation.
//!
//! The merged per-day view carries this tag end to end, so nothing ever has to
//! guess from an identifier string whether a record is stored or derived.

use super::{
    obligation::SyntheticObligation,
    payment::{Payment, PaymentStatus},
};
use chrono::NaiveDate;
use serde::Serialize;

/// One row in a day's merged list.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "source", content = "record", rename_all = "snake_case")]
pub enum CalendarEntry {
    /// A record that lives in the store
    Persisted(Payment),
    /// A rule-derived suggestion that lives nowhere
    Synthetic(SyntheticObligation),
}

impl CalendarEntry {
    /// Identifier as shown to the UI layer.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Persisted(p) => p.id.as_str(),
            Self::Synthetic(o) => o.id.as_str(),
        }
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        match self {
            Self::Persisted(p) => p.date,
            Self::Synthetic(o) => o.date,
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Persisted(p) => &p.description,
            Self::Synthetic(o) => &o.description,
        }
    }

    #[must_use]
    pub fn recipient(&self) -> &str {
        match self {
            Self::Persisted(p) => &p.recipient,
            Self::Synthetic(o) => &o.recipient,
        }
    }

    #[must_use]
    pub const fn amount(&self) -> f64 {
        match self {
            Self::Persisted(p) => p.amount,
            Self::Synthetic(o) => o.amount(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> PaymentStatus {
        match self {
            Self::Persisted(p) => p.status,
            Self::Synthetic(o) => o.status(),
        }
    }

    /// True for rule-derived entries.
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic(_))
    }
}
