//! Hourly wage proration.
//!
//! Basic pay follows the seconds actually worked: wage ÷ 3600 × worked
//! seconds, with overtime seconds excluded from the worked figure. Hourly
//! wages have no separate loss-of-pay concept; absence simply yields fewer
//! worked seconds.

use rust_decimal::Decimal;

use crate::models::{AttendanceRecord, WagePeriod};

use super::proration::ProrationResult;

const SECONDS_PER_HOUR: u64 = 3600;

/// Computes hourly-wage basic pay from validated attendance.
///
/// Records outside the period are ignored. Paid days equal the number of
/// attendance records inside the period; unpaid days are always zero.
pub fn compute_hourly(
    wage: Decimal,
    attendance: &[AttendanceRecord],
    period: &WagePeriod,
) -> ProrationResult {
    let in_period: Vec<&AttendanceRecord> = attendance
        .iter()
        .filter(|record| period.contains_date(record.date))
        .collect();

    let worked_seconds: u64 = in_period
        .iter()
        .map(|record| record.regular_seconds())
        .sum();
    let overtime_seconds: u64 = in_period
        .iter()
        .map(|record| record.overtime_seconds)
        .sum();

    let wage_per_second = wage / Decimal::from(SECONDS_PER_HOUR);
    let basic_pay = wage_per_second * Decimal::from(worked_seconds);
    let overtime_hours =
        Decimal::from(overtime_seconds) / Decimal::from(SECONDS_PER_HOUR);

    ProrationResult {
        basic_pay,
        loss_of_pay: Decimal::ZERO,
        lop_folded_into_basic: false,
        paid_days: Decimal::from(in_period.len() as u64),
        unpaid_days: Decimal::ZERO,
        overtime_hours,
        months: Vec::new(),
    }
}
