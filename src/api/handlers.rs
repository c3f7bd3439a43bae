//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::payslip::{generate, generate_bulk};

use super::request::{BulkGenerateRequest, GeneratePayslipRequest};
use super::response::{ApiError, ApiErrorResponse, BulkGenerationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payslips", post(generate_handler))
        .route("/payslips/bulk", post(bulk_handler))
        .with_state(state)
}

/// Turns a JSON extraction rejection into an error response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> axum::response::Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

/// Handler for `POST /payslips`.
///
/// Computes one payslip and persists it, overwriting any existing record
/// for the same (employee, period) key.
async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePayslipRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip generation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let inputs = request.into_inputs(None);
    let mut store = match state.store().lock() {
        Ok(guard) => guard,
        Err(_) => {
            let api_error = ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("STORE_ERROR", "Payslip store is unavailable"),
            };
            return api_error.into_response();
        }
    };

    match generate(&inputs, state.config(), state.tax(), &mut store) {
        Ok(payslip) => {
            info!(
                correlation_id = %correlation_id,
                badge_id = %inputs.employee.badge_id,
                payslip_id = %payslip.id,
                net_pay = %payslip.net_pay,
                "Payslip generation completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(payslip),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                badge_id = %inputs.employee.badge_id,
                error = %err,
                "Payslip generation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Handler for `POST /payslips/bulk`.
///
/// Generates payslips for a batch of employees. A failure for one employee
/// is reported in the response and does not abort the batch.
async fn bulk_handler(
    State(state): State<AppState>,
    payload: Result<Json<BulkGenerateRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing bulk payslip generation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let group_name = request.group_name.clone();
    let batch: Vec<_> = request
        .requests
        .into_iter()
        .map(|entry| entry.into_inputs(group_name.as_deref()))
        .collect();

    let mut store = match state.store().lock() {
        Ok(guard) => guard,
        Err(_) => {
            let api_error = ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("STORE_ERROR", "Payslip store is unavailable"),
            };
            return api_error.into_response();
        }
    };

    let outcome = generate_bulk(&batch, state.config(), state.tax(), &mut store);
    let response: BulkGenerationResponse = outcome.into();
    info!(
        correlation_id = %correlation_id,
        generated = response.generated,
        skipped = response.skipped,
        "Bulk payslip generation completed"
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}
