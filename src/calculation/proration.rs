//! Wage proration strategy selection.
//!
//! This module defines the shared [`ProrationResult`] contract and the
//! [`prorate`] dispatcher that selects a strategy from the contract's wage
//! type. When no active contract exists but a wage figure is supplied
//! directly, monthly proration is the default strategy; with neither, the
//! computation fails fast.

use rust_decimal::Decimal;

use crate::config::CompanyCalendar;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Contract, Employee, WagePeriod, WageType};

use super::attendance::CalendarFacts;
use super::daily_wage::compute_daily;
use super::hourly_wage::compute_hourly;
use super::monthly_wage::{MonthSpan, compute_monthly, month_spans};

/// The outcome of prorating a wage over a period.
#[derive(Debug, Clone, PartialEq)]
pub struct ProrationResult {
    /// Basic pay for the period (already reduced by loss-of-pay when
    /// `lop_folded_into_basic` is set).
    pub basic_pay: Decimal,
    /// The loss-of-pay amount for unpaid absence in the period.
    pub loss_of_pay: Decimal,
    /// True when `loss_of_pay` was netted out of `basic_pay` by the
    /// strategy, per the contract flag.
    pub lop_folded_into_basic: bool,
    /// Paid days (half days count 0.5).
    pub paid_days: Decimal,
    /// Unpaid days (half days count 0.5).
    pub unpaid_days: Decimal,
    /// Overtime hours observed in the period (hourly strategy only).
    pub overtime_hours: Decimal,
    /// The per-month proration spans backing the figures.
    pub months: Vec<MonthSpan>,
}

/// Prorates the employee's wage over the period.
///
/// Strategy selection:
/// - an active contract selects its configured wage type;
/// - no active contract but a positive `wage_override` selects monthly
///   proration with that wage;
/// - otherwise the computation fails with
///   [`EngineError::MissingContract`] and nothing is persisted.
///
/// A `wage_override` also replaces the contract wage when a contract is
/// present.
pub fn prorate(
    employee: &Employee,
    contract: Option<&Contract>,
    wage_override: Option<Decimal>,
    period: &WagePeriod,
    facts: &CalendarFacts,
    calendar: &CompanyCalendar,
    attendance: &[AttendanceRecord],
) -> EngineResult<ProrationResult> {
    let active = contract.filter(|contract| contract.is_active());

    match active {
        Some(contract) => {
            let wage = wage_override.unwrap_or(contract.wage);
            let mut result = match contract.wage_type {
                WageType::Hourly => compute_hourly(wage, attendance, period),
                WageType::Daily => compute_daily(contract, wage, facts),
                WageType::Monthly => {
                    compute_monthly(Some(contract), wage, period, facts, calendar)
                }
            };
            if result.months.is_empty() {
                result.months = month_spans(wage, period, calendar);
            }
            Ok(result)
        }
        None => match wage_override {
            Some(wage) if wage > Decimal::ZERO => {
                Ok(compute_monthly(None, wage, period, facts, calendar))
            }
            _ => Err(EngineError::MissingContract {
                employee: employee.badge_id.clone(),
            }),
        },
    }
}
