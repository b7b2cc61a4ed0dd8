//! Year-span arithmetic for dues periods.
//!
//! A paid-up span that starts on an anchor date ends one year later, minus one day.
//! Month lengths use the simplified leap rule (divisible by 4 and not by 100), so
//! century years divisible by 400 are treated as common years.

use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate};

/// Leap year under the simplified rule used for dues spans.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && year % 100 != 0
}

/// Number of days in `month` (1-12) of `year`.
#[must_use]
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Last day of the paid-up period starting at `anchor`.
///
/// `2024-03-15` ends on `2025-03-14`; a span starting on the first of a month ends
/// on the last day of the previous month a year later, and one starting on
/// January 1st ends on December 31st of the same year.
pub fn end_of_year_span(anchor: NaiveDate) -> Result<NaiveDate> {
    let out_of_range = || Error::DateOutOfRange { date: anchor };
    let next_year = anchor.year().checked_add(1).ok_or_else(out_of_range)?;

    let (year, month, day) = if anchor.day() == 1 {
        if anchor.month() == 1 {
            (anchor.year(), 12, 31)
        } else {
            let month = anchor.month() - 1;
            (next_year, month, days_in_month(next_year, month))
        }
    } else {
        (next_year, anchor.month(), anchor.day() - 1)
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(out_of_range)
}

/// Start of the span that follows a span ending on `paid_through`.
pub fn day_after(paid_through: NaiveDate) -> Result<NaiveDate> {
    paid_through.succ_opt().ok_or(Error::DateOutOfRange { date: paid_through })
}
