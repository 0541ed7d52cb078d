//! Summary statistics over the persisted payments.
//!
//! Everything is recomputed from the full list on each call. Synthetic
//! obligations never count, since they are not stored.

use crate::entities::{Payment, PaymentStatus};
use serde::Serialize;

/// Aggregate figures for a list of payments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PaymentSummary {
    /// Sum of every amount, any status
    pub total_amount: f64,
    /// Number of payments
    pub count: usize,
    /// Number of completed payments
    pub completed: usize,
    /// Number of pending payments (`count - completed`)
    pub pending: usize,
    /// Sum of the amounts still pending
    pub pending_amount: f64,
}

/// Computes the summary for `payments`.
#[must_use]
pub fn summarize(payments: &[Payment]) -> PaymentSummary {
    let total_amount: f64 = payments.iter().map(|p| p.amount).sum();
    let count = payments.len();
    let completed = payments.iter().filter(|p| p.is_completed()).count();
    let pending_amount: f64 = payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Pending)
        .map(|p| p.amount)
        .sum();

    PaymentSummary {
        total_amount,
        count,
        completed,
        pending: count - completed,
        pending_amount,
    }
}
