//! Payroll Computation Engine
//!
//! This crate derives a structured pay breakdown for an employee over a wage
//! period: period-based wage proration (hourly/daily/monthly strategies),
//! rule-based allowances and deductions evaluated against employee
//! attributes, a four-tier deduction pipeline, and idempotent payslip
//! persistence.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod payslip;
