//! Working-day derivation for a wage period.
//!
//! A working day is a calendar date that is neither a weekly off, a public
//! holiday, nor a company-wide leave day, per the company calendar.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::config::CompanyCalendar;
use crate::models::WagePeriod;

/// The working-day facts for a wage period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDays {
    /// Total calendar days in the period.
    pub total_days: u32,
    /// Dates that count as working days.
    pub working_day_dates: BTreeSet<NaiveDate>,
    /// Holiday dates within the period.
    pub holiday_dates: BTreeSet<NaiveDate>,
    /// Company-wide leave dates within the period.
    pub company_leave_dates: BTreeSet<NaiveDate>,
}

impl WorkingDays {
    /// Number of working days in the period.
    pub fn total_working_days(&self) -> u32 {
        self.working_day_dates.len() as u32
    }
}

/// Derives the working days of a period from the company calendar.
///
/// Every date in the period lands in exactly one bucket: weekly offs are
/// dropped first, then holidays, then company leave days; what remains is a
/// working day.
pub fn working_days(period: &WagePeriod, calendar: &CompanyCalendar) -> WorkingDays {
    let holiday_dates = calendar.holiday_dates(period);
    let company_leave_dates = calendar.company_leave_dates(period);

    let working_day_dates = period
        .dates()
        .into_iter()
        .filter(|date| {
            !calendar.is_weekly_off(*date)
                && !holiday_dates.contains(date)
                && !company_leave_dates.contains(date)
        })
        .collect();

    WorkingDays {
        total_days: period.total_days(),
        working_day_dates,
        holiday_dates,
        company_leave_dates,
    }
}
