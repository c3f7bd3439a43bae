//! HTTP API module for the payroll computation engine.
//!
//! This module provides the REST API endpoints for generating payslips,
//! singly and in bulk.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BulkGenerateRequest, GeneratePayslipRequest};
pub use response::{ApiError, BulkGenerationResponse, SkippedEntry};
pub use state::AppState;
