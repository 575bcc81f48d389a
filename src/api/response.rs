//! Response types for the payroll API.
//!
//! This module defines the success envelope returned by `/payroll`, the
//! decimal payslip summary, and the error response structures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AuditTrace, PayrollOutput, basis_points_to_percent, cents_to_euros};

/// Response body for a successful `/payroll` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The fiscal year whose parameters were applied.
    pub fiscal_year: u16,
    /// The employee the payslip is for.
    pub employee_id: String,
    /// Every payslip figure in cents and basis points.
    pub payroll: PayrollOutput,
    /// The headline figures in euros and percentages.
    pub payslip: PayslipSummary,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
    /// The calculation duration in microseconds.
    pub duration_us: u64,
}

/// Headline payslip figures rendered as decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipSummary {
    /// Monthly gross including prorated extras and extra hours, in euros.
    pub gross_pay: Decimal,
    /// IRPF withheld, in euros.
    pub irpf_withholding: Decimal,
    /// Effective IRPF rate, in percent.
    pub irpf_rate_percent: Decimal,
    /// Social Security withheld from the worker, in euros.
    pub social_security_worker: Decimal,
    /// Social Security paid by the employer, in euros.
    pub social_security_employer: Decimal,
    /// What the employee is paid, in euros.
    pub net_pay: Decimal,
    /// Gross pay plus employer contributions, in euros.
    pub employer_cost: Decimal,
}

impl From<&PayrollOutput> for PayslipSummary {
    fn from(output: &PayrollOutput) -> Self {
        let ss = &output.ss_contributions;
        PayslipSummary {
            gross_pay: cents_to_euros(output.monthly_gross_with_extras),
            irpf_withholding: cents_to_euros(output.irpf_amount),
            irpf_rate_percent: basis_points_to_percent(output.irpf_effective_rate),
            social_security_worker: cents_to_euros(ss.total_worker),
            social_security_employer: cents_to_euros(ss.total_employer),
            net_pay: cents_to_euros(output.net_salary),
            employer_cost: cents_to_euros(output.monthly_gross_with_extras + ss.total_employer),
        }
    }
}

/// Error body returned by every failed `/payroll` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable machine-readable code, e.g. `INVALID_INPUT`.
    pub code: String,
    /// What went wrong, naming the offending field when there is one.
    pub message: String,
    /// Extra context for the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Builds an error without details.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Builds an error carrying extra context.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        ApiError {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// The body deserialized but a required field was absent.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// The body was not valid JSON for a payroll request.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// An [`ApiError`] paired with the status it is sent with.
pub struct ApiErrorResponse {
    /// HTTP status of the reply.
    pub status: StatusCode,
    /// JSON body of the reply.
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
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid payroll input field '{}': {}", field, message),
                    "The payroll data is outside the range the engine supports",
                ),
            },
            EngineError::InvalidTaxScale { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Fiscal parameters are invalid",
                    message,
                ),
            },
        }
    }
}
