//! Payslip record model.
//!
//! A payslip is the persisted result of one computation, uniquely identified
//! by (employee, start_date, end_date). Recomputation overwrites the record
//! for that key; it never creates a duplicate.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::breakdown::PayBreakdown;
use super::wage_period::WagePeriod;

/// The lifecycle status of a payslip.
///
/// Generation always writes `Draft`; the later states are advanced by
/// review workflows outside this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayslipStatus {
    /// Freshly generated, not yet reviewed.
    Draft,
    /// Under review.
    Review,
    /// Approved for payment.
    Confirmed,
    /// Paid out.
    Paid,
}

/// The identity a payslip is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayslipKey {
    /// The employee the payslip belongs to.
    pub employee_id: Uuid,
    /// Period start date.
    pub start_date: NaiveDate,
    /// Period end date.
    pub end_date: NaiveDate,
}

impl PayslipKey {
    /// Builds the key for an employee and period.
    pub fn new(employee_id: Uuid, period: &WagePeriod) -> Self {
        Self {
            employee_id,
            start_date: period.start_date,
            end_date: period.end_date,
        }
    }
}

/// A persisted payslip record.
///
/// All currency figures are rounded to two decimal places before the record
/// is stored. The record is only created or updated by an explicit
/// generate/recompute operation, never silently by a read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payslip {
    /// Stable record id. Overwriting a payslip keeps its id.
    pub id: Uuid,
    /// The employee the payslip belongs to.
    pub employee_id: Uuid,
    /// Period start date.
    pub start_date: NaiveDate,
    /// Period end date.
    pub end_date: NaiveDate,
    /// Lifecycle status.
    pub status: PayslipStatus,
    /// Bulk-run group the payslip was generated under, if any.
    #[serde(default)]
    pub group_name: Option<String>,
    /// The contract wage the computation started from.
    pub contract_wage: Decimal,
    /// Basic pay for the period.
    pub basic_pay: Decimal,
    /// Gross pay for the period.
    pub gross_pay: Decimal,
    /// Net pay for the period.
    pub net_pay: Decimal,
    /// Total deduction subtracted from gross pay.
    pub total_deduction: Decimal,
    /// The full structured breakdown behind the headline figures.
    pub breakdown: PayBreakdown,
}

impl Payslip {
    /// Returns the identity key this payslip is stored under.
    pub fn key(&self) -> PayslipKey {
        PayslipKey {
            employee_id: self.employee_id,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
