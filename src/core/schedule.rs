//! Recurrence rule table.
//!
//! Purely declarative scheduling data: which billing and payment windows apply
//! in which month, which named tax obligations fall on which exact dates, and
//! which day of every month carries the monthly deliverable. The deriver in
//! [`crate::core::obligations`] only reads this data, so adding a rule never
//! means touching derivation logic.
//!
//! Months are zero-based (0 = January, 11 = December) to match
//! [`chrono::Datelike::month0`].

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Recipient shown on invoice-reception obligations.
pub const BILLING_RECIPIENT: &str = "Invoice Reception";
/// Description shown on invoice-reception obligations.
pub const BILLING_DESCRIPTION: &str = "Mandatory reception: billing statements and invoices.";
/// Recipient shown on payment-execution obligations.
pub const PAYMENT_RECIPIENT: &str = "Administration / Payments";
/// Description shown on payment-execution obligations.
pub const PAYMENT_DESCRIPTION: &str = "Scheduled execution of supplier payments.";

/// Billing and payment windows for one month of the year.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindows {
    /// Zero-based month (0-11)
    pub month: u32,
    /// Days on which invoices and billing statements are received
    #[serde(default)]
    pub billing: Vec<u32>,
    /// Days on which supplier payments are executed
    #[serde(default)]
    pub payments: Vec<u32>,
}

/// A (month, day) pair within a year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthDay {
    /// Zero-based month (0-11)
    pub month: u32,
    /// Day of month (1-31)
    pub day: u32,
}

impl MonthDay {
    #[must_use]
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }
}

/// A named obligation that falls on an explicit list of dates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactDateRule {
    /// Slug used in obligation identifiers (lowercase letters, digits, `-`)
    pub key: String,
    /// Counterparty or responsible area
    pub recipient: String,
    /// Free-text description
    pub description: String,
    /// Every date in the year on which this obligation is due
    pub dates: Vec<MonthDay>,
}

impl ExactDateRule {
    /// Whether the rule is due on this (zero-based month, day).
    #[must_use]
    pub fn falls_on(&self, month: u32, day: u32) -> bool {
        self.dates.contains(&MonthDay::new(month, day))
    }
}

/// A deliverable due on the same day of every month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedDayRule {
    /// Day of month (1-31)
    pub day: u32,
    /// Counterparty or responsible area
    pub recipient: String,
    /// Free-text description
    pub description: String,
}

/// The whole scheduling table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    /// Per-month billing/payment windows; months may be missing
    #[serde(default)]
    pub months: Vec<MonthWindows>,
    /// Named exact-date obligations, in declaration order
    #[serde(default)]
    pub exact_dates: Vec<ExactDateRule>,
    /// Optional monthly deliverable
    #[serde(default)]
    pub monthly: Option<FixedDayRule>,
}

impl RuleTable {
    /// Windows declared for a zero-based month, if any.
    #[must_use]
    pub fn month_windows(&self, month: u32) -> Option<&MonthWindows> {
        self.months.iter().find(|w| w.month == month)
    }

    /// Checks that the table is sensible before anything derives from it.
    ///
    /// # Errors
    /// Returns `Error::Config` when a month is out of range or declared twice,
    /// a day is outside 1-31, or an exact-date key is empty, malformed or
    /// duplicated.
    pub fn validate(&self) -> Result<()> {
        let mut seen_months = HashSet::new();
        for windows in &self.months {
            check_month(windows.month)?;
            if !seen_months.insert(windows.month) {
                return Err(config_error(format!(
                    "month {} is declared more than once",
                    windows.month
                )));
            }
            for &day in windows.billing.iter().chain(&windows.payments) {
                check_day(day)?;
            }
        }

        let mut seen_keys = HashSet::new();
        for rule in &self.exact_dates {
            let is_slug = !rule.key.is_empty()
                && rule
                    .key
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
            if !is_slug {
                return Err(config_error(format!(
                    "exact-date rule key {:?} must be a non-empty lowercase slug",
                    rule.key
                )));
            }
            if !seen_keys.insert(rule.key.as_str()) {
                return Err(config_error(format!(
                    "exact-date rule key {:?} is declared more than once",
                    rule.key
                )));
            }
            for date in &rule.dates {
                check_month(date.month)?;
                check_day(date.day)?;
            }
        }

        if let Some(monthly) = &self.monthly {
            check_day(monthly.day)?;
        }

        Ok(())
    }

    /// The 2026 operating schedule.
    ///
    /// Billing and payment windows sit in the last working week of each month,
    /// skip public holidays, and move forward in December for the annual close.
    #[must_use]
    pub fn builtin() -> Self {
        let months = [
            (0, [26, 27], [28, 29, 30]),
            (1, [23, 24], [25, 26, 27]),
            (2, [24, 25], [26, 27, 30]),
            (3, [24, 27], [28, 29, 30]),
            (4, [25, 26], [27, 28, 29]),
            (5, [22, 23], [24, 25, 26]),
            (6, [27, 28], [29, 30, 31]),
            (7, [25, 26], [27, 28, 31]),
            (8, [24, 25], [28, 29, 30]),
            (9, [26, 27], [28, 29, 30]),
            (10, [24, 25], [26, 27, 30]),
            (11, [14, 15], [16, 17, 18]),
        ]
        .into_iter()
        .map(|(month, billing, payments)| MonthWindows {
            month,
            billing: billing.to_vec(),
            payments: payments.to_vec(),
        })
        .collect();

        let exact_dates = vec![
            ExactDateRule {
                key: "withholding".to_string(),
                recipient: "Tax Authority".to_string(),
                description: "Monthly withholding tax return and payment.".to_string(),
                dates: month_days(&[
                    (0, 13),
                    (1, 11),
                    (2, 11),
                    (3, 14),
                    (4, 12),
                    (5, 10),
                    (6, 14),
                    (7, 12),
                    (8, 10),
                    (9, 14),
                    (10, 11),
                    (11, 11),
                ]),
            },
            ExactDateRule {
                key: "vat".to_string(),
                recipient: "Tax Authority".to_string(),
                description: "Bimonthly VAT return and payment.".to_string(),
                dates: month_days(&[(0, 20), (2, 11), (4, 12), (6, 14), (8, 10), (10, 11)]),
            },
            ExactDateRule {
                key: "income-tax".to_string(),
                recipient: "Tax Authority".to_string(),
                description: "Annual income tax return, installment payment.".to_string(),
                dates: month_days(&[(7, 19), (9, 20)]),
            },
        ];

        Self {
            months,
            exact_dates,
            monthly: Some(FixedDayRule {
                day: 5,
                recipient: "Management".to_string(),
                description: "Monthly financial report delivery.".to_string(),
            }),
        }
    }
}

fn month_days(pairs: &[(u32, u32)]) -> Vec<MonthDay> {
    pairs
        .iter()
        .map(|&(month, day)| MonthDay::new(month, day))
        .collect()
}

fn check_month(month: u32) -> Result<()> {
    if month > 11 {
        return Err(config_error(format!(
            "month {month} is out of range (expected 0-11)"
        )));
    }
    Ok(())
}

fn check_day(day: u32) -> Result<()> {
    if !(1..=31).contains(&day) {
        return Err(config_error(format!(
            "day {day} is out of range (expected 1-31)"
        )));
    }
    Ok(())
}

fn config_error(message: String) -> Error {
    Error::Config { message }
}
