//! Contribution base calculation.
//!
//! BCCC (common contingencies) covers the monthly gross plus prorated extra
//! payments. BCCP (professional contingencies) adds the pay for extra hours,
//! which carries accident exposure but not common contingencies.

use serde::Serialize;

use crate::config::FiscalParameters;
use crate::models::{AuditStep, PayrollInput, cents_to_euros};

use super::salary::{ResolvedSalary, resolve_salary};

/// The two Social Security contribution bases for a month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContributionBases {
    /// Base for common contingencies.
    pub bccc: i64,
    /// Base for professional contingencies.
    pub bccp: i64,
}

/// The result of the contribution base calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct ContributionBaseResult {
    /// The calculated bases.
    pub bases: ContributionBases,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Derives BCCC and BCCP from a resolved salary.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::{ResolvedSalary, calculate_contribution_bases};
///
/// let salary = ResolvedSalary {
///     monthly_gross: 200_000,
///     monthly_prorated_extra: 33_333,
///     extra_hours_pay: 6_250,
///     ..Default::default()
/// };
///
/// let result = calculate_contribution_bases(&salary, 2);
/// assert_eq!(result.bases.bccc, 233_333);
/// assert_eq!(result.bases.bccp, 239_583);
/// ```
pub fn calculate_contribution_bases(
    salary: &ResolvedSalary,
    step_number: u32,
) -> ContributionBaseResult {
    let bccc = salary
        .monthly_gross
        .saturating_add(salary.monthly_prorated_extra);
    let bccp = bccc.saturating_add(salary.extra_hours_pay);
    let bases = ContributionBases { bccc, bccp };

    let audit_step = AuditStep {
        step_number,
        rule_id: "contribution_bases".to_string(),
        rule_name: "Contribution Bases".to_string(),
        legal_ref: "LGSS art. 147".to_string(),
        input: serde_json::json!({
            "monthly_gross": salary.monthly_gross,
            "monthly_prorated_extra": salary.monthly_prorated_extra,
            "extra_hours_pay": salary.extra_hours_pay
        }),
        output: serde_json::json!({
            "bccc": bccc,
            "bccp": bccp
        }),
        reasoning: format!(
            "BCCC €{} = gross €{} + prorated extras €{}; BCCP €{} adds extra hours €{}",
            cents_to_euros(bccc),
            cents_to_euros(salary.monthly_gross),
            cents_to_euros(salary.monthly_prorated_extra),
            cents_to_euros(bccp),
            cents_to_euros(salary.extra_hours_pay)
        ),
    };

    ContributionBaseResult { bases, audit_step }
}

/// Contribution base for common contingencies.
pub fn bccc(input: &PayrollInput, params: &FiscalParameters) -> i64 {
    let salary = resolve_salary(input, params, 1).salary;
    calculate_contribution_bases(&salary, 1).bases.bccc
}

/// Contribution base for professional contingencies.
pub fn bccp(input: &PayrollInput, params: &FiscalParameters) -> i64 {
    let salary = resolve_salary(input, params, 1).salary;
    calculate_contribution_bases(&salary, 1).bases.bccp
}
