//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoint that validates a payroll request,
//! runs the calculation pipeline and returns the payslip with its audit trace.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    DisabilityRequest, FamilyRequest, OvertimeRequest, PayrollRequest, SalaryRequest,
};
pub use response::{ApiError, ApiErrorResponse, PayrollResponse, PayslipSummary};
pub use state::AppState;
