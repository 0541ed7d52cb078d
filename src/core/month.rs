//! Month grid - The days a calendar page shows for a given month.
//!
//! A page covers whole weeks starting on Monday, so it usually begins in the
//! previous month and ends in the next one.

use crate::entities::CalendarEntry;
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

/// One cell of a month page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the leading and trailing days borrowed from adjacent months
    pub is_current_month: bool,
    pub is_today: bool,
    /// Merged entries for the day, persisted first
    pub entries: Vec<CalendarEntry>,
}

/// First day of the month containing `anchor`.
#[must_use]
pub fn start_of_month(anchor: NaiveDate) -> NaiveDate {
    anchor.with_day(1).unwrap_or(anchor)
}

/// Last day of the month containing `anchor`.
#[must_use]
pub fn end_of_month(anchor: NaiveDate) -> NaiveDate {
    let first = start_of_month(anchor);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

/// Every date shown on the page for the month containing `anchor`, from the
/// Monday on or before the 1st through the Sunday on or after the last day.
#[must_use]
pub fn month_grid_dates(anchor: NaiveDate) -> Vec<NaiveDate> {
    let first = start_of_month(anchor);
    let last = end_of_month(anchor);

    let lead = u64::from(first.weekday().num_days_from_monday());
    let trail = u64::from(6 - last.weekday().num_days_from_monday());

    let start = first.checked_sub_days(Days::new(lead)).unwrap_or(first);
    let end = last.checked_add_days(Days::new(trail)).unwrap_or(last);

    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Whether `date` lies in the same month and year as `anchor`.
#[must_use]
pub fn is_same_month(date: NaiveDate, anchor: NaiveDate) -> bool {
    date.year() == anchor.year() && date.month() == anchor.month()
}
