//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files: the company working-day
//! calendar and the allowance/deduction rule catalog.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Weekday};
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{AllowanceRule, ComparisonOp, Condition, DeductionRule, WagePeriod};

/// A public holiday entry in the company calendar.
#[derive(Debug, Clone, Deserialize)]
pub struct Holiday {
    /// The name of the holiday (e.g., "New Year").
    pub name: String,
    /// First day of the holiday.
    pub start_date: NaiveDate,
    /// Last day of the holiday. Single-day holidays omit this.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// The company calendar file structure (`company.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyCalendarConfig {
    /// The company name.
    pub company: String,
    /// Weekly-off day names (e.g., "saturday", "sunday").
    pub weekly_off_days: Vec<String>,
    /// Public holidays.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// Company-wide leave dates (paid closures outside public holidays).
    #[serde(default)]
    pub company_leave_dates: Vec<NaiveDate>,
}

/// The allowances file structure (`allowances.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct AllowancesConfig {
    /// All configured allowance rules.
    pub allowances: Vec<AllowanceRule>,
}

/// The deductions file structure (`deductions.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct DeductionsConfig {
    /// All configured deduction rules.
    pub deductions: Vec<DeductionRule>,
}

/// A validated company calendar with parsed weekday entries.
///
/// Built from [`CompanyCalendarConfig`]; unknown weekday names are rejected
/// at load time so the calendar never fails later.
#[derive(Debug, Clone)]
pub struct CompanyCalendar {
    company: String,
    weekly_offs: Vec<Weekday>,
    holidays: Vec<Holiday>,
    company_leave_dates: Vec<NaiveDate>,
}

impl CompanyCalendar {
    /// Validates and builds a calendar from its raw configuration.
    pub fn from_config(config: CompanyCalendarConfig, source: &str) -> EngineResult<Self> {
        let mut weekly_offs = Vec::with_capacity(config.weekly_off_days.len());
        for name in &config.weekly_off_days {
            let weekday: Weekday =
                name.parse()
                    .map_err(|_| EngineError::ConfigParseError {
                        path: source.to_string(),
                        message: format!("unknown weekday name '{name}'"),
                    })?;
            weekly_offs.push(weekday);
        }
        Ok(Self {
            company: config.company,
            weekly_offs,
            holidays: config.holidays,
            company_leave_dates: config.company_leave_dates,
        })
    }

    /// Returns the company name.
    pub fn company(&self) -> &str {
        &self.company
    }

    /// Returns true if the date falls on a configured weekly off.
    pub fn is_weekly_off(&self, date: NaiveDate) -> bool {
        use chrono::Datelike;
        self.weekly_offs.contains(&date.weekday())
    }

    /// Returns all holiday dates that fall within the period.
    pub fn holiday_dates(&self, period: &WagePeriod) -> BTreeSet<NaiveDate> {
        let mut dates = BTreeSet::new();
        for holiday in &self.holidays {
            let holiday_end = holiday.end_date.unwrap_or(holiday.start_date);
            let from = holiday.start_date.max(period.start_date);
            let to = holiday_end.min(period.end_date);
            let mut current = from;
            while current <= to {
                dates.insert(current);
                current = match current.succ_opt() {
                    Some(next) => next,
                    None => break,
                };
            }
        }
        dates
    }

    /// Returns the company-wide leave dates that fall within the period.
    pub fn company_leave_dates(&self, period: &WagePeriod) -> BTreeSet<NaiveDate> {
        self.company_leave_dates
            .iter()
            .copied()
            .filter(|date| period.contains_date(*date))
            .collect()
    }
}

/// The configured allowance and deduction rules.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    allowances: Vec<AllowanceRule>,
    deductions: Vec<DeductionRule>,
}

/// A non-fatal problem found while validating a rule catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogWarning {
    /// The title of the offending rule.
    pub rule_title: String,
    /// What is wrong with the rule.
    pub message: String,
}

impl RuleCatalog {
    /// Creates a catalog from its rule lists.
    pub fn new(allowances: Vec<AllowanceRule>, deductions: Vec<DeductionRule>) -> Self {
        Self {
            allowances,
            deductions,
        }
    }

    /// Creates an empty catalog.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Returns all allowance rules.
    pub fn allowances(&self) -> &[AllowanceRule] {
        &self.allowances
    }

    /// Returns all deduction rules.
    pub fn deductions(&self) -> &[DeductionRule] {
        &self.deductions
    }

    /// Validates the catalog, returning a warning per problem found.
    ///
    /// The `range` comparison operator never matches (its semantics await
    /// product clarification), so any rule using it is flagged here rather
    /// than failing silently at evaluation time.
    pub fn validate(&self) -> Vec<CatalogWarning> {
        let mut warnings = Vec::new();

        let flag_range = |title: &str, conditions: &[Condition], warnings: &mut Vec<CatalogWarning>| {
            for condition in conditions {
                if condition.operator == ComparisonOp::Range {
                    warnings.push(CatalogWarning {
                        rule_title: title.to_string(),
                        message: format!(
                            "condition on '{}' uses the 'range' operator, which never matches",
                            condition.field
                        ),
                    });
                }
            }
        };

        for rule in &self.allowances {
            flag_range(&rule.title, &rule.conditions, &mut warnings);
            if let Some(gate) = &rule.gate {
                if gate.operator == ComparisonOp::Range {
                    warnings.push(CatalogWarning {
                        rule_title: rule.title.clone(),
                        message: "gating condition uses the 'range' operator, which never matches"
                            .to_string(),
                    });
                }
            }
        }
        for rule in &self.deductions {
            flag_range(&rule.title, &rule.conditions, &mut warnings);
        }
        warnings
    }
}
