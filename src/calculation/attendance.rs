//! Calendar and attendance aggregation.
//!
//! This module turns the raw leave and attendance rows for a wage period
//! into [`CalendarFacts`]: working days, paid/unpaid leave dates, half-day
//! counters, present dates and unaccounted absence. The aggregation is a
//! pure function of its inputs; identical inputs always produce identical
//! facts.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::config::CompanyCalendar;
use crate::models::{AttendanceRecord, LeavePayment, LeaveRecord, WagePeriod};

use super::working_days::{WorkingDays, working_days};

/// The aggregated calendar facts for an employee over a wage period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarFacts {
    /// Total calendar days in the period.
    pub total_days: u32,
    /// Working-day facts.
    pub working_days: WorkingDays,
    /// Dates with a validated attendance record.
    pub present_dates: BTreeSet<NaiveDate>,
    /// Approved paid-leave dates (company leave days excluded).
    pub paid_leave_dates: BTreeSet<NaiveDate>,
    /// Approved unpaid-leave dates (company leave days excluded).
    pub unpaid_leave_dates: BTreeSet<NaiveDate>,
    /// Half-day credit on paid leave (0.5 per qualifying half day).
    pub paid_half_days: Decimal,
    /// Half-day credit on unpaid leave (0.5 per qualifying half day).
    pub unpaid_half_days: Decimal,
    /// Working days with no attendance, leave, holiday or company leave
    /// to account for them.
    pub conflict_dates: BTreeSet<NaiveDate>,
}

impl CalendarFacts {
    /// Paid leave in day units: full paid-leave dates count 1, half-day
    /// paid leaves count 0.5.
    pub fn paid_leave_days(&self) -> Decimal {
        clamp_non_negative(
            Decimal::from(self.paid_leave_dates.len() as u64) - self.paid_half_days,
            "paid leave days",
        )
    }

    /// Unpaid leave in day units: full unpaid-leave dates count 1, half-day
    /// unpaid leaves count 0.5.
    pub fn unpaid_leave_days(&self) -> Decimal {
        clamp_non_negative(
            Decimal::from(self.unpaid_leave_dates.len() as u64) - self.unpaid_half_days,
            "unpaid leave days",
        )
    }

    /// Number of unaccounted absence days.
    pub fn conflict_days(&self) -> Decimal {
        Decimal::from(self.conflict_dates.len() as u64)
    }
}

/// Clamps a day count at zero, logging when clamping fires: a negative
/// count indicates inconsistent leave/attendance data that needs correction,
/// not a reason to abort the payslip run.
pub(crate) fn clamp_non_negative(value: Decimal, what: &str) -> Decimal {
    if value < Decimal::ZERO {
        warn!(%value, "negative {what} clamped to zero; source data needs correction");
        Decimal::ZERO
    } else {
        value
    }
}

/// Aggregates leave and attendance rows into [`CalendarFacts`].
///
/// Rows outside the period are ignored, so callers may pass wider result
/// sets. Holiday and company-leave dates never count as leave or absence:
/// they are excluded from the leave date sets and from the conflict
/// (unaccounted absence) set difference.
pub fn aggregate(
    period: &WagePeriod,
    calendar: &CompanyCalendar,
    leaves: &[LeaveRecord],
    attendance: &[AttendanceRecord],
) -> CalendarFacts {
    let working = working_days(period, calendar);

    let mut paid_leave_dates: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut unpaid_leave_dates: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut paid_half_count: u64 = 0;
    let mut unpaid_half_count: u64 = 0;

    for leave in leaves {
        let in_period: Vec<NaiveDate> = leave
            .requested_dates()
            .into_iter()
            .filter(|date| {
                period.contains_date(*date) && !working.company_leave_dates.contains(date)
            })
            .collect();
        match leave.payment {
            LeavePayment::Paid => paid_leave_dates.extend(in_period),
            LeavePayment::Unpaid => unpaid_leave_dates.extend(in_period),
        }

        // A half-day on the first or last date of the leave contributes 0.5
        // to the matching half counter. For a one-day leave only the start
        // breakdown applies.
        let half_count = {
            let mut count = 0u64;
            if period.contains_date(leave.start_date) && leave.start_breakdown.is_half_day() {
                count += 1;
            }
            if leave.end_date != leave.start_date
                && period.contains_date(leave.end_date)
                && leave.end_breakdown.is_half_day()
            {
                count += 1;
            }
            count
        };
        match leave.payment {
            LeavePayment::Paid => paid_half_count += half_count,
            LeavePayment::Unpaid => unpaid_half_count += half_count,
        }
    }

    let present_dates: BTreeSet<NaiveDate> = attendance
        .iter()
        .map(|record| record.date)
        .filter(|date| period.contains_date(*date))
        .collect();

    // Conflict = working days - present - leave - holidays - company leaves.
    // Working days already exclude holidays and company leaves; the explicit
    // subtraction keeps the invariant even if the calendar drifts.
    let mut conflict_dates: BTreeSet<NaiveDate> = working.working_day_dates.clone();
    for date in present_dates
        .iter()
        .chain(paid_leave_dates.iter())
        .chain(unpaid_leave_dates.iter())
        .chain(working.holiday_dates.iter())
        .chain(working.company_leave_dates.iter())
    {
        conflict_dates.remove(date);
    }

    let half = Decimal::new(5, 1);
    CalendarFacts {
        total_days: period.total_days(),
        working_days: working,
        present_dates,
        paid_leave_dates,
        unpaid_leave_dates,
        paid_half_days: Decimal::from(paid_half_count) * half,
        unpaid_half_days: Decimal::from(unpaid_half_count) * half,
        conflict_dates,
    }
}
