//! Response types for the payroll engine API.
//!
//! This module defines the error response structures, the bulk-run summary
//! body and the error mapping for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::payslip::BulkOutcome;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::MissingContract { employee } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "MISSING_CONTRACT",
                    format!("No active contract for employee '{}'", employee),
                    "Supply an active contract or a wage figure to compute this payslip",
                ),
            },
            EngineError::InvalidPeriod {
                start_date,
                end_date,
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PERIOD",
                    format!("Invalid wage period {} to {}", start_date, end_date),
                    "The period start date must not be after its end date",
                ),
            },
            EngineError::InvalidEmployee { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    format!("Invalid employee field '{}': {}", field, message),
                    "The employee data contains invalid information",
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}

/// A skipped employee in a bulk response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedEntry {
    /// The badge id of the skipped employee.
    pub badge_id: String,
    /// The human-readable reason the employee was skipped.
    pub reason: String,
}

/// Response body for `POST /payslips/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkGenerationResponse {
    /// Number of payslips generated.
    pub generated: usize,
    /// Number of employees skipped.
    pub skipped: usize,
    /// Ids of the generated payslips.
    pub payslip_ids: Vec<Uuid>,
    /// The skipped employees with reasons.
    pub skipped_employees: Vec<SkippedEntry>,
}

impl From<BulkOutcome> for BulkGenerationResponse {
    fn from(outcome: BulkOutcome) -> Self {
        Self {
            generated: outcome.generated.len(),
            skipped: outcome.skipped.len(),
            payslip_ids: outcome.generated,
            skipped_employees: outcome
                .skipped
                .into_iter()
                .map(|entry| SkippedEntry {
                    badge_id: entry.badge_id,
                    reason: entry.reason,
                })
                .collect(),
        }
    }
}
