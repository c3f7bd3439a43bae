//! Monthly wage proration.
//!
//! The period is split into its constituent calendar months; each month
//! contributes working_days_in_period ÷ working_days_in_month × wage to
//! basic pay, so partial first/last months prorate correctly. A month whose
//! working-day count is zero contributes a per-day amount of zero rather
//! than dividing by zero.

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::config::CompanyCalendar;
use crate::models::{Contract, LeavePenalty, WagePeriod, month_end, month_start};

use super::attendance::{CalendarFacts, clamp_non_negative};
use super::proration::ProrationResult;
use super::working_days::working_days;

/// One calendar month's contribution to a monthly proration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSpan {
    /// Calendar year of the month.
    pub year: i32,
    /// Calendar month number (1–12).
    pub month: u32,
    /// First period date falling in this month.
    pub start_date: chrono::NaiveDate,
    /// Last period date falling in this month.
    pub end_date: chrono::NaiveDate,
    /// Working days in the full calendar month.
    pub working_days_in_month: u32,
    /// Working days of the period that fall in this month.
    pub working_days_in_period: u32,
    /// Wage ÷ working_days_in_month, or zero when the month has no working
    /// days.
    pub per_day_amount: Decimal,
}

/// Splits a period into per-month proration spans.
pub fn month_spans(
    wage: Decimal,
    period: &WagePeriod,
    calendar: &CompanyCalendar,
) -> Vec<MonthSpan> {
    period
        .month_slices()
        .into_iter()
        .map(|slice| {
            let full_month = WagePeriod {
                start_date: month_start(slice.start_date),
                end_date: month_end(slice.start_date),
            };
            let working_days_in_month =
                working_days(&full_month, calendar).total_working_days();
            let working_days_in_period =
                working_days(&slice, calendar).total_working_days();
            let per_day_amount = if working_days_in_month == 0 {
                Decimal::ZERO
            } else {
                wage / Decimal::from(working_days_in_month)
            };
            MonthSpan {
                year: slice.start_date.year(),
                month: slice.start_date.month(),
                start_date: slice.start_date,
                end_date: slice.end_date,
                working_days_in_month,
                working_days_in_period,
                per_day_amount,
            }
        })
        .collect()
}

/// The per-day wage for the calendar month containing `wage_date`.
///
/// Returns zero when the month has no working days.
pub fn daily_wage_for(
    wage: Decimal,
    wage_date: chrono::NaiveDate,
    calendar: &CompanyCalendar,
) -> Decimal {
    let full_month = WagePeriod {
        start_date: month_start(wage_date),
        end_date: month_end(wage_date),
    };
    let count = working_days(&full_month, calendar).total_working_days();
    if count == 0 {
        Decimal::ZERO
    } else {
        wage / Decimal::from(count)
    }
}

/// Computes monthly-wage basic pay and loss of pay.
///
/// `contract` may be absent (the no-contract-with-wage default path); the
/// loss-of-pay penalty then uses the per-day wage and nothing is folded
/// into basic pay.
pub fn compute_monthly(
    contract: Option<&Contract>,
    wage: Decimal,
    period: &WagePeriod,
    facts: &CalendarFacts,
    calendar: &CompanyCalendar,
) -> ProrationResult {
    let months = month_spans(wage, period, calendar);

    let mut basic_pay = Decimal::ZERO;
    for span in &months {
        basic_pay += Decimal::from(span.working_days_in_period) * span.per_day_amount;
    }

    let unpaid_days = facts.unpaid_leave_days();
    let per_day_amount = daily_wage_for(wage, period.start_date, calendar);

    let penalty_per_day = match contract.map(|c| c.leave_penalty) {
        Some(LeavePenalty::FixedAmount(amount)) => amount,
        Some(LeavePenalty::DailyWage) | None => per_day_amount,
    };
    let loss_of_pay = unpaid_days * penalty_per_day;

    let lop_folded_into_basic = contract
        .map(|c| c.deduct_leave_from_basic_pay)
        .unwrap_or(false);
    if lop_folded_into_basic {
        basic_pay -= loss_of_pay;
    }

    let total_working_days = Decimal::from(facts.working_days.total_working_days());
    let paid_days = clamp_non_negative(total_working_days - unpaid_days, "paid days");

    ProrationResult {
        basic_pay,
        loss_of_pay,
        lop_folded_into_basic,
        paid_days,
        unpaid_days,
        overtime_hours: Decimal::ZERO,
        months,
    }
}
