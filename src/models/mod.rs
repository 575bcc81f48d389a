//! Core data models for the payroll engine.
//!
//! This module contains the input and output records of the pipeline and
//! the audit trace types every stage reports into.

mod audit;
mod money;
mod payroll_input;
mod payroll_output;

pub use audit::{AuditStep, AuditTrace, AuditWarning, warning_codes};
pub use money::{basis_points_to_percent, cents_to_euros};
pub use payroll_input::{
    MAX_AMOUNT_CENTS, MAX_EXTRA_HOURS, MAX_EXTRA_PAYMENTS, MAX_SALARY_COMPLEMENTS, PayrollInput,
};
pub use payroll_output::{PayrollCalculation, PayrollOutput, SSCotisations};
