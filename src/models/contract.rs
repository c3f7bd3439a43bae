//! Wage contract model.
//!
//! This module defines the [`Contract`] struct carrying the wage figure, the
//! proration strategy selector and the leave-penalty knobs the daily and
//! monthly strategies consult.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Selects which wage proration strategy applies to a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WageType {
    /// Wage is an hourly rate; basic pay follows worked seconds.
    Hourly,
    /// Wage is a per-working-day rate.
    Daily,
    /// Wage is a monthly salary, prorated over working days.
    Monthly,
}

/// The lifecycle status of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// The contract is in force.
    Active,
    /// The contract has run out.
    Expired,
    /// The contract was terminated before its end.
    Terminated,
}

/// How one unpaid leave day is charged against the employee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeavePenalty {
    /// Each unpaid day costs the computed daily wage.
    DailyWage,
    /// Each unpaid day costs a fixed configured amount.
    FixedAmount(Decimal),
}

/// An employee's wage contract.
///
/// The engine only reads contracts; creating and managing them is a CRUD
/// concern outside this crate.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Contract, ContractStatus, LeavePenalty, WageType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let contract = Contract {
///     wage: Decimal::from(3000),
///     wage_type: WageType::Monthly,
///     status: ContractStatus::Active,
///     start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     leave_penalty: LeavePenalty::DailyWage,
///     deduct_leave_from_basic_pay: false,
///     housing_allowance: Decimal::ZERO,
///     transport_allowance: Decimal::ZERO,
///     other_allowance: Decimal::ZERO,
/// };
/// assert!(contract.is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// The contract wage. Its unit depends on `wage_type` (per hour, per
    /// working day or per month).
    pub wage: Decimal,
    /// Which proration strategy the wage uses.
    pub wage_type: WageType,
    /// The contract lifecycle status.
    pub status: ContractStatus,
    /// The date the contract takes effect. Payslip periods starting before
    /// this date are clamped to it.
    pub start_date: NaiveDate,
    /// How unpaid leave days are charged.
    pub leave_penalty: LeavePenalty,
    /// When true, the loss-of-pay amount is netted out of basic pay by the
    /// proration strategy instead of being subtracted later as a deduction.
    pub deduct_leave_from_basic_pay: bool,
    /// Fixed housing allowance added into gross pay.
    #[serde(default)]
    pub housing_allowance: Decimal,
    /// Fixed transport allowance added into gross pay.
    #[serde(default)]
    pub transport_allowance: Decimal,
    /// Fixed catch-all allowance added into gross pay.
    #[serde(default)]
    pub other_allowance: Decimal,
}

impl Contract {
    /// Returns true if the contract is currently in force.
    pub fn is_active(&self) -> bool {
        self.status == ContractStatus::Active
    }
}
