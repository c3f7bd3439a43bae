//! HTTP request types for the payroll engine API.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{AttendanceRecord, Contract, Employee, LeaveRecord, WagePeriod};
use crate::payslip::GenerationInputs;

/// Request body for `POST /payslips`.
///
/// Collaborator data (contract, leave, attendance) arrives fully
/// materialized in the request; the engine performs no I/O of its own
/// during computation.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratePayslipRequest {
    /// The employee to compute for.
    pub employee: Employee,
    /// The employee's wage contract, if one exists.
    #[serde(default)]
    pub contract: Option<Contract>,
    /// A wage figure overriding (or standing in for) the contract wage.
    #[serde(default)]
    pub wage: Option<Decimal>,
    /// The wage period to compute.
    pub period: WagePeriod,
    /// Approved leave rows overlapping the period.
    #[serde(default)]
    pub leaves: Vec<LeaveRecord>,
    /// Validated attendance rows for the period.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    /// Optional group tag for the generated payslip.
    #[serde(default)]
    pub group_name: Option<String>,
}

impl GeneratePayslipRequest {
    /// Converts the request into engine generation inputs, applying a
    /// fallback group name (used by bulk requests).
    pub fn into_inputs(self, default_group: Option<&str>) -> GenerationInputs {
        GenerationInputs {
            employee: self.employee,
            contract: self.contract,
            wage: self.wage,
            period: self.period,
            leaves: self.leaves,
            attendance: self.attendance,
            group_name: self
                .group_name
                .or_else(|| default_group.map(String::from)),
        }
    }
}

/// Request body for `POST /payslips/bulk`.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkGenerateRequest {
    /// Group name stamped on every generated payslip that does not carry
    /// its own.
    #[serde(default)]
    pub group_name: Option<String>,
    /// One entry per employee.
    pub requests: Vec<GeneratePayslipRequest>,
}
