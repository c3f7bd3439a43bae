//! Wage period model.
//!
//! This module contains the [`WagePeriod`] type that defines the date range
//! a payslip computation covers.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A wage period with an inclusive start and end date.
///
/// All payslip computations are scoped to a wage period. The period is
/// inclusive on both ends, so a one-day period has a total of one day.
///
/// # Example
///
/// ```
/// use payroll_engine::models::WagePeriod;
/// use chrono::NaiveDate;
///
/// let period = WagePeriod {
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
/// };
/// assert_eq!(period.total_days(), 31);
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagePeriod {
    /// The start date of the wage period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the wage period (inclusive).
    pub end_date: NaiveDate,
}

impl WagePeriod {
    /// Creates a wage period, rejecting ranges whose start is after their end.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        let period = Self {
            start_date,
            end_date,
        };
        period.validate()?;
        Ok(period)
    }

    /// Validates the start/end ordering invariant.
    ///
    /// Deserialized periods must be validated before use; [`WagePeriod::new`]
    /// does this automatically.
    pub fn validate(&self) -> EngineResult<()> {
        if self.start_date > self.end_date {
            return Err(EngineError::InvalidPeriod {
                start_date: self.start_date,
                end_date: self.end_date,
            });
        }
        Ok(())
    }

    /// Returns the total number of calendar days in the period, inclusive
    /// of both ends.
    pub fn total_days(&self) -> u32 {
        (self.end_date - self.start_date).num_days() as u32 + 1
    }

    /// Checks if a given date falls within this period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns every date in the period, in ascending order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates = Vec::with_capacity(self.total_days() as usize);
        let mut current = self.start_date;
        while current <= self.end_date {
            dates.push(current);
            current = match current.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
        dates
    }

    /// Splits the period into per-calendar-month sub-periods.
    ///
    /// The first and last sub-periods are clipped to the period bounds, so a
    /// period spanning 2026-01-15..2026-03-10 yields three sub-periods:
    /// Jan 15–31, Feb 1–28 and Mar 1–10.
    pub fn month_slices(&self) -> Vec<WagePeriod> {
        let mut slices = Vec::new();
        let mut cursor = self.start_date;
        while cursor <= self.end_date {
            let slice_end = month_end(cursor).min(self.end_date);
            slices.push(WagePeriod {
                start_date: cursor,
                end_date: slice_end,
            });
            cursor = match slice_end.checked_add_days(Days::new(1)) {
                Some(next) => next,
                None => break,
            };
        }
        slices
    }
}

/// Returns the first day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Returns the last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// WP-001: total days is inclusive of both ends
    #[test]
    fn test_total_days_inclusive() {
        let period = WagePeriod::new(date(2026, 1, 1), date(2026, 1, 31)).unwrap();
        assert_eq!(period.total_days(), 31);
    }

    /// WP-002: a single-day period has one day
    #[test]
    fn test_single_day_period() {
        let period = WagePeriod::new(date(2026, 1, 1), date(2026, 1, 1)).unwrap();
        assert_eq!(period.total_days(), 1);
        assert_eq!(period.dates(), vec![date(2026, 1, 1)]);
    }

    /// WP-003: start after end is rejected
    #[test]
    fn test_inverted_period_is_rejected() {
        let result = WagePeriod::new(date(2026, 2, 1), date(2026, 1, 1));
        assert!(matches!(
            result,
            Err(EngineError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_contains_date_boundaries() {
        let period = WagePeriod::new(date(2026, 1, 5), date(2026, 1, 10)).unwrap();
        assert!(period.contains_date(date(2026, 1, 5)));
        assert!(period.contains_date(date(2026, 1, 10)));
        assert!(!period.contains_date(date(2026, 1, 4)));
        assert!(!period.contains_date(date(2026, 1, 11)));
    }

    /// WP-004: month slices clip to period bounds
    #[test]
    fn test_month_slices_partial_months() {
        let period = WagePeriod::new(date(2026, 1, 15), date(2026, 3, 10)).unwrap();
        let slices = period.month_slices();
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].start_date, date(2026, 1, 15));
        assert_eq!(slices[0].end_date, date(2026, 1, 31));
        assert_eq!(slices[1].start_date, date(2026, 2, 1));
        assert_eq!(slices[1].end_date, date(2026, 2, 28));
        assert_eq!(slices[2].start_date, date(2026, 3, 1));
        assert_eq!(slices[2].end_date, date(2026, 3, 10));
    }

    #[test]
    fn test_month_slices_single_full_month() {
        let period = WagePeriod::new(date(2026, 4, 1), date(2026, 4, 30)).unwrap();
        let slices = period.month_slices();
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0], period);
    }

    #[test]
    fn test_month_end_handles_leap_year() {
        assert_eq!(month_end(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(month_end(date(2026, 2, 10)), date(2026, 2, 28));
        assert_eq!(month_end(date(2026, 12, 10)), date(2026, 12, 31));
    }

    #[test]
    fn test_month_start() {
        assert_eq!(month_start(date(2026, 7, 19)), date(2026, 7, 1));
    }

    #[test]
    fn test_serde_round_trip() {
        let period = WagePeriod::new(date(2026, 1, 1), date(2026, 1, 31)).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert!(json.contains("\"start_date\":\"2026-01-01\""));
        let back: WagePeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period);
    }
}
