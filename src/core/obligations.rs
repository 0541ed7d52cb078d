//! Obligation derivation - Turns a calendar date into the system obligations due on it.
//!
//! Derivation is a pure function of the rule table and the date. The output
//! order is fixed: billing, payment, every matching exact-date rule in
//! declaration order, then the monthly deliverable. That order is the
//! tie-break when several obligations share a day.

use crate::{
    core::schedule::{
        BILLING_DESCRIPTION, BILLING_RECIPIENT, PAYMENT_DESCRIPTION, PAYMENT_RECIPIENT, RuleTable,
    },
    entities::{ObligationCategory, SyntheticObligation},
};
use chrono::{Datelike, NaiveDate};
use tracing::trace;

/// Derives the ordered list of synthetic obligations for `date`.
///
/// A month with no window entry yields no billing or payment obligations but
/// can still yield exact-date and monthly ones. A day can be in both the
/// billing and payment lists, in which case both obligations are emitted.
#[must_use]
pub fn derive_obligations(rules: &RuleTable, date: NaiveDate) -> Vec<SyntheticObligation> {
    let month = date.month0();
    let day = date.day();
    let mut obligations = Vec::new();

    if let Some(windows) = rules.month_windows(month) {
        if windows.billing.contains(&day) {
            obligations.push(SyntheticObligation::new(
                ObligationCategory::Billing,
                date,
                BILLING_RECIPIENT,
                BILLING_DESCRIPTION,
            ));
        }

        if windows.payments.contains(&day) {
            obligations.push(SyntheticObligation::new(
                ObligationCategory::Payment,
                date,
                PAYMENT_RECIPIENT,
                PAYMENT_DESCRIPTION,
            ));
        }
    }

    for rule in rules.exact_dates.iter().filter(|r| r.falls_on(month, day)) {
        obligations.push(SyntheticObligation::new(
            ObligationCategory::Tax {
                key: rule.key.clone(),
            },
            date,
            rule.recipient.as_str(),
            rule.description.as_str(),
        ));
    }

    if let Some(monthly) = rules.monthly.as_ref().filter(|m| m.day == day) {
        obligations.push(SyntheticObligation::new(
            ObligationCategory::MonthlyDeliverable,
            date,
            monthly.recipient.as_str(),
            monthly.description.as_str(),
        ));
    }

    trace!(%date, count = obligations.len(), "derived obligations");
    obligations
}
