//! Core data models for the payroll computation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod breakdown;
mod contract;
mod employee;
mod payslip;
mod rules;
mod wage_period;

pub use attendance::{AttendanceRecord, DayBreakdown, LeavePayment, LeaveRecord};
pub use breakdown::{
    AllowanceLine, ContractAllowances, DeductionLine, EmployerContribution, PayBreakdown,
};
pub use contract::{Contract, ContractStatus, LeavePenalty, WageType};
pub use employee::{AttributeValue, Employee};
pub use payslip::{Payslip, PayslipKey, PayslipStatus};
pub use rules::{
    AllowanceGate, AllowanceRule, AmountMode, ComparisonOp, CompensationTarget, Condition,
    DeductionCategory, DeductionRule, PayComponent, RuleScope,
};
pub use wage_period::{WagePeriod, month_end, month_start};
