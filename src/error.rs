//! Error types for the payroll computation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during payslip computation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll computation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No active contract exists for the employee and no wage was supplied.
    #[error("No active contract for employee '{employee}' in this period and no wage supplied")]
    MissingContract {
        /// The badge id of the employee without a contract.
        employee: String,
    },

    /// A wage period was invalid (start date after end date).
    #[error("Invalid wage period: start date {start_date} is after end date {end_date}")]
    InvalidPeriod {
        /// The offending start date.
        start_date: NaiveDate,
        /// The offending end date.
        end_date: NaiveDate,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_missing_contract_displays_employee() {
        let error = EngineError::MissingContract {
            employee: "PEP0023".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "No active contract for employee 'PEP0023' in this period and no wage supplied"
        );
    }

    #[test]
    fn test_invalid_period_displays_dates() {
        let error = EngineError::InvalidPeriod {
            start_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid wage period: start date 2026-02-01 is after end date 2026-01-01"
        );
    }

    #[test]
    fn test_invalid_employee_displays_field_and_message() {
        let error = EngineError::InvalidEmployee {
            field: "badge_id".to_string(),
            message: "cannot be empty".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid employee field 'badge_id': cannot be empty"
        );
    }

    #[test]
    fn test_calculation_error_displays_message() {
        let error = EngineError::CalculationError {
            message: "negative unpaid days".to_string(),
        };
        assert_eq!(error.to_string(), "Calculation error: negative unpaid days");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_contract() -> EngineResult<()> {
            Err(EngineError::MissingContract {
                employee: "PEP0001".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_contract()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
