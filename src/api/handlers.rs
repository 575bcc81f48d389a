//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::{Duration, Instant};

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::calculate_payroll;
use crate::models::PayrollInput;

use super::request::PayrollRequest;
use super::response::{ApiError, ApiErrorResponse, PayrollResponse, PayslipSummary};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll", post(payroll_handler))
        .with_state(state)
}

/// Handler for POST /payroll endpoint.
///
/// Accepts a payroll request and returns the calculated payslip.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_to_api_error(rejection, correlation_id);
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let employee_id = request.employee_id.clone();
    let input: PayrollInput = request.into();

    if let Err(err) = input.validate() {
        warn!(
            correlation_id = %correlation_id,
            employee_id = %employee_id,
            error = %err,
            "Payroll input rejected"
        );
        return ApiErrorResponse::from(err).into_response();
    }

    let params = state.params();
    let start_time = Instant::now();
    let calculation = calculate_payroll(&input, params);
    let duration = start_time.elapsed();

    for warning in &calculation.audit_trace.warnings {
        debug!(
            correlation_id = %correlation_id,
            code = %warning.code,
            message = %warning.message,
            "Input clamped during calculation"
        );
    }

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        net_salary = calculation.output.net_salary,
        irpf_amount = calculation.output.irpf_amount,
        warnings = calculation.audit_trace.warnings.len(),
        duration_us = duration.as_micros(),
        "Payroll calculated successfully"
    );

    let response = PayrollResponse {
        calculation_id: correlation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        fiscal_year: params.fiscal_year,
        employee_id,
        payslip: PayslipSummary::from(&calculation.output),
        payroll: calculation.output,
        audit_trace: calculation.audit_trace,
        duration_us: elapsed_micros(duration),
    };

    json_response(StatusCode::OK, response)
}

/// Microseconds in `duration`, saturating at `u64::MAX`.
fn elapsed_micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

fn rejection_to_api_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
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
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
