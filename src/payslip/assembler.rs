//! Payslip assembly and generation.
//!
//! This module orchestrates one payslip computation end to end (aggregate
//! calendar facts, prorate the wage, run the compensation pipeline) and
//! persists the rounded result through the store. Bulk generation isolates
//! per-employee failures so one bad record never aborts a batch.

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{TaxSource, aggregate, compute_breakdown, prorate};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, Contract, Employee, LeaveRecord, PayBreakdown, Payslip, PayslipStatus,
    WagePeriod,
};

use super::store::PayslipStore;

/// Everything needed to compute one employee's payslip.
///
/// All collaborator data arrives fully materialized, per the engine's
/// no-blocking-I/O contract: the caller fetches leave and attendance rows
/// up front.
#[derive(Debug, Clone)]
pub struct GenerationInputs {
    /// The employee to compute for.
    pub employee: Employee,
    /// The employee's wage contract, if one exists.
    pub contract: Option<Contract>,
    /// A wage figure overriding (or standing in for) the contract wage.
    pub wage: Option<Decimal>,
    /// The requested wage period.
    pub period: WagePeriod,
    /// Approved leave rows overlapping the period.
    pub leaves: Vec<LeaveRecord>,
    /// Validated attendance rows for the period.
    pub attendance: Vec<AttendanceRecord>,
    /// The bulk-run group to tag the payslip with.
    pub group_name: Option<String>,
}

/// The outcome of a bulk generation run.
#[derive(Debug, Clone, Default)]
pub struct BulkOutcome {
    /// Ids of the payslips that were generated.
    pub generated: Vec<Uuid>,
    /// Employees that were skipped, with the reason.
    pub skipped: Vec<SkippedEmployee>,
}

/// A skipped entry in a bulk generation run.
#[derive(Debug, Clone)]
pub struct SkippedEmployee {
    /// The badge id of the skipped employee.
    pub badge_id: String,
    /// The human-readable reason the employee was skipped.
    pub reason: String,
}

/// Clamps the requested period to the contract start date.
///
/// A payslip can never start before the employee's active contract does;
/// a contract starting after the period ends leaves nothing to pay and is
/// reported as an invalid period.
fn effective_period(inputs: &GenerationInputs) -> EngineResult<WagePeriod> {
    inputs.period.validate()?;
    let Some(contract) = inputs.contract.as_ref().filter(|c| c.is_active()) else {
        return Ok(inputs.period);
    };
    if contract.start_date <= inputs.period.start_date {
        return Ok(inputs.period);
    }
    if contract.start_date > inputs.period.end_date {
        return Err(EngineError::InvalidPeriod {
            start_date: contract.start_date,
            end_date: inputs.period.end_date,
        });
    }
    info!(
        badge_id = %inputs.employee.badge_id,
        contract_start = %contract.start_date,
        "period start clamped to contract start date"
    );
    WagePeriod::new(contract.start_date, inputs.period.end_date)
}

/// Computes the pay breakdown for one employee without persisting anything.
pub fn compute(
    inputs: &GenerationInputs,
    config: &ConfigLoader,
    tax: &dyn TaxSource,
) -> EngineResult<(WagePeriod, PayBreakdown)> {
    let period = effective_period(inputs)?;
    let calendar = config.calendar();

    let facts = aggregate(&period, calendar, &inputs.leaves, &inputs.attendance);
    let proration = prorate(
        &inputs.employee,
        inputs.contract.as_ref(),
        inputs.wage,
        &period,
        &facts,
        calendar,
        &inputs.attendance,
    )?;
    let contract_wage = inputs
        .wage
        .or(inputs
            .contract
            .as_ref()
            .filter(|c| c.is_active())
            .map(|c| c.wage))
        .unwrap_or(Decimal::ZERO);

    let breakdown = compute_breakdown(
        &inputs.employee,
        inputs.contract.as_ref().filter(|c| c.is_active()),
        contract_wage,
        &proration,
        config.catalog(),
        &period,
        tax,
    );
    Ok((period, breakdown))
}

/// Builds the payslip record for a computed breakdown.
///
/// Currency figures are rounded to two decimal places here, at the
/// persistence boundary; intermediate math stays unrounded.
fn assemble(
    employee_id: Uuid,
    period: &WagePeriod,
    group_name: Option<String>,
    breakdown: &PayBreakdown,
) -> Payslip {
    let rounded = breakdown.rounded();
    Payslip {
        id: Uuid::new_v4(),
        employee_id,
        start_date: period.start_date,
        end_date: period.end_date,
        status: PayslipStatus::Draft,
        group_name,
        contract_wage: rounded.contract_wage,
        basic_pay: rounded.basic_pay,
        gross_pay: rounded.gross_pay,
        net_pay: rounded.net_pay,
        total_deduction: rounded.total_deduction,
        breakdown: rounded,
    }
}

/// Rounds a computed breakdown into a payslip record and persists it,
/// returning the stored record's id.
///
/// Re-running with identical inputs overwrites the stored record in place.
pub fn assemble_and_persist(
    employee_id: Uuid,
    period: &WagePeriod,
    group_name: Option<String>,
    breakdown: &PayBreakdown,
    store: &mut PayslipStore,
) -> Uuid {
    store.upsert(assemble(employee_id, period, group_name, breakdown))
}

/// Generates (or regenerates) one payslip: compute, round, persist.
pub fn generate(
    inputs: &GenerationInputs,
    config: &ConfigLoader,
    tax: &dyn TaxSource,
    store: &mut PayslipStore,
) -> EngineResult<Payslip> {
    let (period, breakdown) = compute(inputs, config, tax)?;
    let mut payslip = assemble(
        inputs.employee.id,
        &period,
        inputs.group_name.clone(),
        &breakdown,
    );
    // The store keeps the id of any record it overwrites.
    payslip.id = store.upsert(payslip.clone());
    info!(
        badge_id = %inputs.employee.badge_id,
        payslip_id = %payslip.id,
        net_pay = %payslip.net_pay,
        "payslip generated"
    );
    Ok(payslip)
}

/// Generates payslips for a batch of employees.
///
/// A failure computing one employee's payslip is recorded with its reason
/// and the batch continues; nothing partial is persisted for skipped
/// employees.
pub fn generate_bulk(
    batch: &[GenerationInputs],
    config: &ConfigLoader,
    tax: &dyn TaxSource,
    store: &mut PayslipStore,
) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();
    for inputs in batch {
        match generate(inputs, config, tax, store) {
            Ok(payslip) => outcome.generated.push(payslip.id),
            Err(error) => {
                warn!(
                    badge_id = %inputs.employee.badge_id,
                    %error,
                    "skipping employee in bulk payslip run"
                );
                outcome.skipped.push(SkippedEmployee {
                    badge_id: inputs.employee.badge_id.clone(),
                    reason: error.to_string(),
                });
            }
        }
    }
    outcome
}
