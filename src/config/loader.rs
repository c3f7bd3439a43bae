//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the company
//! calendar and rule catalog from YAML files.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{EngineError, EngineResult};

use super::types::{
    AllowancesConfig, CatalogWarning, CompanyCalendar, CompanyCalendarConfig, DeductionsConfig,
    RuleCatalog,
};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── company.yaml     # Working-day calendar: weekly offs, holidays, closures
/// ├── allowances.yaml  # Configured allowance rules
/// └── deductions.yaml  # Configured deduction rules
/// ```
///
/// Catalog validation runs at load time; problems that do not prevent
/// computation (such as a rule using the reserved `range` operator) are
/// collected as warnings and logged, not raised as errors.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("{} allowance rules", loader.catalog().allowances().len());
/// for warning in loader.warnings() {
///     println!("rule '{}': {}", warning.rule_title, warning.message);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    calendar: CompanyCalendar,
    catalog: RuleCatalog,
    warnings: Vec<CatalogWarning>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` when a required file is missing and
    /// `ConfigParseError` when a file contains invalid YAML or an unknown
    /// weekday name.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let company_path = path.join("company.yaml");
        let calendar_config = Self::load_yaml::<CompanyCalendarConfig>(&company_path)?;
        let calendar =
            CompanyCalendar::from_config(calendar_config, &company_path.display().to_string())?;

        let allowances_path = path.join("allowances.yaml");
        let allowances = Self::load_yaml::<AllowancesConfig>(&allowances_path)?;

        let deductions_path = path.join("deductions.yaml");
        let deductions = Self::load_yaml::<DeductionsConfig>(&deductions_path)?;

        let catalog = RuleCatalog::new(allowances.allowances, deductions.deductions);
        let warnings = catalog.validate();
        for warning in &warnings {
            warn!(
                rule = %warning.rule_title,
                "catalog validation: {}",
                warning.message
            );
        }

        Ok(Self {
            calendar,
            catalog,
            warnings,
        })
    }

    /// Builds a loader from already-constructed parts, validating the
    /// catalog the same way `load` does. Useful for tests and embedders
    /// that do not read configuration from disk.
    pub fn from_parts(calendar: CompanyCalendar, catalog: RuleCatalog) -> Self {
        let warnings = catalog.validate();
        Self {
            calendar,
            catalog,
            warnings,
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the company calendar.
    pub fn calendar(&self) -> &CompanyCalendar {
        &self.calendar
    }

    /// Returns the rule catalog.
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Returns the validation warnings collected at load time.
    pub fn warnings(&self) -> &[CatalogWarning] {
        &self.warnings
    }
}
