//! Social Security contribution calculation.
//!
//! Each concept is `base x rate / 10,000` with truncating division. Every
//! concept is charged on BCCC except occupational accidents, which is
//! charged on BCCP because extra hours carry accident exposure too.

use crate::config::{BASIS_POINTS_SCALE, ContributionRates, FiscalParameters};
use crate::models::{AuditStep, PayrollInput, SSCotisations, cents_to_euros};

use super::contribution_base::{ContributionBases, calculate_contribution_bases};
use super::salary::resolve_salary;

/// Applies a basis-point rate to an amount, truncating toward zero.
///
/// The product is formed in `i128`, so any `i64` amount and rate are
/// accepted; a result outside `i64` saturates.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::apply_rate;
///
/// // 233,333 x 4.70% = 10,966.65 truncated
/// assert_eq!(apply_rate(233_333, 470), 10_966);
/// ```
pub fn apply_rate(base: i64, rate: i64) -> i64 {
    saturate(i128::from(base) * i128::from(rate) / i128::from(BASIS_POINTS_SCALE))
}

/// Narrows a wide intermediate back to cents, saturating at the `i64` bounds.
pub(super) fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// The result of the Social Security calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct SocialSecurityResult {
    /// The itemised and totalled contributions.
    pub contributions: SSCotisations,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies the contribution rates to the two bases.
pub fn calculate_social_security(
    bases: &ContributionBases,
    rates: &ContributionRates,
    step_number: u32,
) -> SocialSecurityResult {
    let contributions = SSCotisations::from_concepts(
        apply_rate(bases.bccc, rates.worker_common_contingencies),
        apply_rate(bases.bccc, rates.worker_unemployment),
        apply_rate(bases.bccc, rates.worker_training),
        apply_rate(bases.bccc, rates.employer_common_contingencies),
        apply_rate(bases.bccc, rates.employer_unemployment),
        apply_rate(bases.bccc, rates.employer_training),
        apply_rate(bases.bccc, rates.employer_fogasa),
        apply_rate(bases.bccp, rates.employer_accidents),
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: "social_security".to_string(),
        rule_name: "Social Security Contributions".to_string(),
        legal_ref: "Orden PJC/178/2025".to_string(),
        input: serde_json::json!({
            "bccc": bases.bccc,
            "bccp": bases.bccp,
            "rates": rates
        }),
        output: serde_json::json!(contributions),
        reasoning: format!(
            "Worker pays €{} and employer pays €{} on BCCC €{} (accidents on BCCP €{})",
            cents_to_euros(contributions.total_worker),
            cents_to_euros(contributions.total_employer),
            cents_to_euros(bases.bccc),
            cents_to_euros(bases.bccp)
        ),
    };

    SocialSecurityResult {
        contributions,
        audit_step,
    }
}

/// Full Social Security breakdown for a payroll input.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::calculate_contributions;
/// use nomina_engine::config::FiscalParameters;
/// use nomina_engine::models::PayrollInput;
///
/// let input = PayrollInput {
///     base_salary: 200_000,
///     number_of_extra_payments: 2,
///     ..Default::default()
/// };
///
/// let ss = calculate_contributions(&input, &FiscalParameters::spain_2025());
/// assert_eq!(ss.worker_cc, 10_966);
/// assert_eq!(ss.total, ss.total_worker + ss.total_employer);
/// ```
pub fn calculate_contributions(input: &PayrollInput, params: &FiscalParameters) -> SSCotisations {
    let salary = resolve_salary(input, params, 1).salary;
    let bases = calculate_contribution_bases(&salary, 2).bases;
    calculate_social_security(&bases, &params.contribution_rates, 3).contributions
}
