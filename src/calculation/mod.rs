//! Calculation logic for the payroll computation engine.
//!
//! This module contains all the computation functions: working-day
//! derivation, calendar/attendance aggregation, the three wage proration
//! strategies and their dispatcher, rule applicability evaluation, the tax
//! collaborator seam, and the layered compensation pipeline.

mod applicability;
mod attendance;
mod daily_wage;
mod hourly_wage;
mod monthly_wage;
mod pipeline;
mod proration;
mod tax;
mod working_days;

pub use applicability::{
    allowance_applies, compare, conditions_hold, deduction_applies, is_in_scope,
};
pub use attendance::{CalendarFacts, aggregate};
pub use daily_wage::compute_daily;
pub use hourly_wage::compute_hourly;
pub use monthly_wage::{MonthSpan, compute_monthly, daily_wage_for, month_spans};
pub use pipeline::compute_breakdown;
pub use proration::{ProrationResult, prorate};
pub use tax::{FlatRateTax, NoTax, TaxInputs, TaxSource};
pub use working_days::{WorkingDays, working_days};
