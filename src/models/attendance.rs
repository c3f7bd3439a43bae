//! Leave and attendance input records.
//!
//! These are the rows the engine consumes from the leave and attendance
//! collaborators. The engine never mutates them; it only aggregates them
//! into calendar facts for a wage period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether an approved leave is paid or unpaid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeavePayment {
    /// The leave days count as paid days.
    Paid,
    /// The leave days count as unpaid (loss-of-pay) days.
    Unpaid,
}

/// How the first or last day of a leave request is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayBreakdown {
    /// The whole day is taken as leave.
    #[default]
    FullDay,
    /// Only the first half of the day is taken.
    FirstHalf,
    /// Only the second half of the day is taken.
    SecondHalf,
}

impl DayBreakdown {
    /// Returns true when only half of the day is taken.
    pub fn is_half_day(&self) -> bool {
        *self != DayBreakdown::FullDay
    }
}

/// An approved leave request overlapping a wage period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// First day of the leave.
    pub start_date: NaiveDate,
    /// Last day of the leave (inclusive; equals `start_date` for one-day
    /// leaves).
    pub end_date: NaiveDate,
    /// Whether the leave is paid or unpaid.
    pub payment: LeavePayment,
    /// How the first day is taken.
    #[serde(default)]
    pub start_breakdown: DayBreakdown,
    /// How the last day is taken. Ignored for one-day leaves, where only
    /// `start_breakdown` applies.
    #[serde(default)]
    pub end_breakdown: DayBreakdown,
}

impl LeaveRecord {
    /// Returns every date the leave covers, in ascending order.
    pub fn requested_dates(&self) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
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
}

/// A validated attendance record for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The date the attendance was recorded for.
    pub date: NaiveDate,
    /// Total seconds at work on that date, including overtime.
    pub worked_seconds: u64,
    /// Seconds of the worked time that count as overtime.
    #[serde(default)]
    pub overtime_seconds: u64,
}

impl AttendanceRecord {
    /// Seconds worked excluding overtime. Saturates at zero if the record
    /// carries more overtime than total worked time.
    pub fn regular_seconds(&self) -> u64 {
        self.worked_seconds.saturating_sub(self.overtime_seconds)
    }
}
