//! Daily wage proration.
//!
//! Basic pay is the daily wage times the period's working days. Unpaid
//! leave (half-day adjusted) plus unaccounted absence charges a per-day
//! penalty, either the full daily wage or a fixed configured amount per the
//! contract, which is optionally netted out of basic pay.

use rust_decimal::Decimal;

use crate::models::{Contract, LeavePenalty};

use super::attendance::{CalendarFacts, clamp_non_negative};
use super::proration::ProrationResult;

/// Computes daily-wage basic pay and loss of pay from calendar facts.
pub fn compute_daily(contract: &Contract, wage: Decimal, facts: &CalendarFacts) -> ProrationResult {
    let total_working_days = Decimal::from(facts.working_days.total_working_days());
    let mut basic_pay = wage * total_working_days;

    let unpaid_days = clamp_non_negative(
        facts.unpaid_leave_days() + facts.conflict_days(),
        "unpaid days",
    );

    let penalty_per_day = match contract.leave_penalty {
        LeavePenalty::DailyWage => wage,
        LeavePenalty::FixedAmount(amount) => amount,
    };
    let loss_of_pay = unpaid_days * penalty_per_day;

    let lop_folded_into_basic = contract.deduct_leave_from_basic_pay;
    if lop_folded_into_basic {
        basic_pay -= loss_of_pay;
    }

    let paid_days = clamp_non_negative(total_working_days - unpaid_days, "paid days");

    ProrationResult {
        basic_pay,
        loss_of_pay,
        lop_folded_into_basic,
        paid_days,
        unpaid_days,
        overtime_hours: Decimal::ZERO,
        months: Vec::new(),
    }
}
