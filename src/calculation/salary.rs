//! Salary resolution.
//!
//! This module derives the monthly and annual gross salary, the proration of
//! extra payments, the personal complement (reconciled against a target
//! annual gross when one is agreed) and the pay for extra hours.
//!
//! Every division here, as everywhere in the engine, is integer division
//! truncating toward zero.

use serde::Serialize;

use crate::config::FiscalParameters;
use crate::models::{AuditStep, AuditWarning, PayrollInput, cents_to_euros, warning_codes};

/// Months in a fiscal year; every "per year / 12" split divides by this.
pub const MONTHS_PER_YEAR: i64 = 12;

/// Where the applied personal complement came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalComplementSource {
    /// Supplied explicitly on the input.
    Explicit,
    /// Derived from the target annual gross salary.
    Reconciled,
    /// Neither supplied nor derivable.
    Absent,
}

/// The monthly personal complement and how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalComplement {
    /// Monthly amount in cents.
    pub monthly: i64,
    /// Where the amount came from.
    pub source: PersonalComplementSource,
    /// The target gross was below the rest of the annual pay and the
    /// complement was clamped to zero.
    pub clamped: bool,
}

impl PersonalComplement {
    fn absent() -> Self {
        Self {
            monthly: 0,
            source: PersonalComplementSource::Absent,
            clamped: false,
        }
    }
}

/// Every salary figure the later stages read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedSalary {
    /// Base salary plus personal complement plus complements.
    pub monthly_gross: i64,
    /// Twelve ordinary monthly payments.
    pub annual_gross: i64,
    /// The amount of one extra payment.
    pub monthly_extra: i64,
    /// All extra payments of the year.
    pub annual_extra: i64,
    /// Annual extra pay spread over twelve months.
    pub monthly_prorated_extra: i64,
    /// Ordinary plus extra payments for the year.
    pub annual_gross_with_extras: i64,
    /// Personal complement applied to the monthly gross.
    pub personal_complement: i64,
    /// Pay for the month's extra hours.
    pub extra_hours_pay: i64,
}

/// The result of salary resolution, including the audit step.
#[derive(Debug, Clone)]
pub struct SalaryResolution {
    /// The resolved salary figures.
    pub salary: ResolvedSalary,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Warnings raised while clamping the input.
    pub warnings: Vec<AuditWarning>,
}

/// Determines the monthly personal complement.
///
/// An explicit (non-zero) complement is used as-is. Otherwise, when a
/// positive target annual gross is supplied, the complement is whatever is
/// left of the target after twelve base salaries and the complements paid in
/// every ordinary and extra payment, clamped at zero and split over twelve
/// months.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::{PersonalComplementSource, resolve_personal_complement};
/// use nomina_engine::models::PayrollInput;
///
/// let input = PayrollInput {
///     base_salary: 150_000,
///     salary_complements: vec![10_000],
///     gross_salary: 2_800_000,
///     number_of_extra_payments: 2,
///     ..Default::default()
/// };
///
/// // 2,800,000 - (150,000 x 12 + 10,000 x 14) = 860,000 per year
/// let complement = resolve_personal_complement(&input);
/// assert_eq!(complement.monthly, 71_666);
/// assert_eq!(complement.source, PersonalComplementSource::Reconciled);
/// ```
pub fn resolve_personal_complement(input: &PayrollInput) -> PersonalComplement {
    if input.personal_complement != 0 {
        return PersonalComplement {
            monthly: input.personal_complement,
            source: PersonalComplementSource::Explicit,
            clamped: false,
        };
    }

    if input.gross_salary <= 0 {
        return PersonalComplement::absent();
    }

    let payments_per_year = MONTHS_PER_YEAR + i64::from(input.number_of_extra_payments);
    let annual_without_personal = input
        .base_salary
        .saturating_mul(MONTHS_PER_YEAR)
        .saturating_add(input.complements_total().saturating_mul(payments_per_year));
    let remainder = input.gross_salary.saturating_sub(annual_without_personal);

    PersonalComplement {
        monthly: remainder.max(0) / MONTHS_PER_YEAR,
        source: PersonalComplementSource::Reconciled,
        clamped: remainder < 0,
    }
}

/// Calculates the pay for the month's extra hours.
///
/// With an explicit per-hour rate the pay is `hours x rate`. Otherwise the
/// hourly rate is the monthly gross divided by the contract's monthly hours
/// (or `default_monthly_hours` when the contract does not state them),
/// truncated to whole cents, then multiplied by the hours worked.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::extra_hours_pay;
/// use nomina_engine::models::PayrollInput;
///
/// let input = PayrollInput {
///     base_salary: 160_000,
///     number_of_extra_hours: 10,
///     ..Default::default()
/// };
/// assert_eq!(extra_hours_pay(&input, 160_000, 160), 10_000);
///
/// let with_rate = PayrollInput { extra_hour_rate: 1_500, ..input };
/// assert_eq!(extra_hours_pay(&with_rate, 160_000, 160), 15_000);
/// ```
pub fn extra_hours_pay(input: &PayrollInput, monthly_gross: i64, default_monthly_hours: u32) -> i64 {
    let hours = i64::from(input.number_of_extra_hours);

    if input.extra_hour_rate > 0 {
        return hours.saturating_mul(input.extra_hour_rate);
    }

    let monthly_hours = if input.monthly_hours > 0 {
        input.monthly_hours
    } else {
        default_monthly_hours
    };
    if monthly_hours == 0 {
        return 0;
    }

    let hourly_rate = monthly_gross / i64::from(monthly_hours);
    hourly_rate.saturating_mul(hours)
}

/// Resolves every salary figure for the payslip.
///
/// A base salary of zero or less collapses the whole gross salary to zero:
/// personal complement, complements and extra hours are all ignored and a
/// `NON_POSITIVE_BASE_SALARY` warning is recorded. A monthly gross that
/// negative complements would push below zero is floored at zero.
///
/// # Arguments
///
/// * `input` - The payroll input
/// * `params` - Fiscal parameters (only the default monthly hours are read)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::resolve_salary;
/// use nomina_engine::config::FiscalParameters;
/// use nomina_engine::models::PayrollInput;
///
/// let input = PayrollInput {
///     base_salary: 200_000,
///     number_of_extra_payments: 2,
///     ..Default::default()
/// };
///
/// let result = resolve_salary(&input, &FiscalParameters::spain_2025(), 1);
/// assert_eq!(result.salary.monthly_gross, 200_000);
/// assert_eq!(result.salary.monthly_prorated_extra, 33_333);
/// assert_eq!(result.salary.annual_gross_with_extras, 2_800_000);
/// ```
pub fn resolve_salary(
    input: &PayrollInput,
    params: &FiscalParameters,
    step_number: u32,
) -> SalaryResolution {
    let mut warnings = Vec::new();

    let (personal, monthly_gross, extra_hours) = if input.base_salary <= 0 {
        warnings.push(AuditWarning::new(
            warning_codes::NON_POSITIVE_BASE_SALARY,
            format!(
                "Base salary {} is not positive; gross salary set to zero",
                input.base_salary
            ),
            "high",
        ));
        (PersonalComplement::absent(), 0, 0)
    } else {
        let personal = resolve_personal_complement(input);
        if personal.clamped {
            warnings.push(AuditWarning::new(
                warning_codes::PERSONAL_COMPLEMENT_CLAMPED,
                format!(
                    "Target gross salary {} is below the rest of the annual pay; personal complement set to zero",
                    cents_to_euros(input.gross_salary)
                ),
                "medium",
            ));
        }

        let monthly_gross = input
            .base_salary
            .saturating_add(personal.monthly)
            .saturating_add(input.complements_total())
            .max(0);
        let extra_hours = extra_hours_pay(input, monthly_gross, params.default_monthly_hours);
        (personal, monthly_gross, extra_hours)
    };

    let extra_payments = i64::from(input.number_of_extra_payments);
    let annual_gross = monthly_gross.saturating_mul(MONTHS_PER_YEAR);
    let monthly_extra = monthly_gross;
    let annual_extra = monthly_extra.saturating_mul(extra_payments);
    let monthly_prorated_extra = annual_extra / MONTHS_PER_YEAR;

    let salary = ResolvedSalary {
        monthly_gross,
        annual_gross,
        monthly_extra,
        annual_extra,
        monthly_prorated_extra,
        annual_gross_with_extras: annual_gross.saturating_add(annual_extra),
        personal_complement: personal.monthly,
        extra_hours_pay: extra_hours,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "salary_resolution".to_string(),
        rule_name: "Salary Resolution".to_string(),
        legal_ref: "ET arts. 26, 31, 35".to_string(),
        input: serde_json::json!({
            "base_salary": input.base_salary,
            "salary_complements": input.salary_complements,
            "personal_complement": input.personal_complement,
            "gross_salary": input.gross_salary,
            "number_of_extra_payments": input.number_of_extra_payments,
            "number_of_extra_hours": input.number_of_extra_hours,
            "extra_hour_rate": input.extra_hour_rate,
            "monthly_hours": input.monthly_hours
        }),
        output: serde_json::json!({
            "salary": salary,
            "personal_complement_source": personal.source
        }),
        reasoning: format!(
            "Monthly gross €{} over {} extra payments prorates to €{}/month; extra hours pay €{}",
            cents_to_euros(monthly_gross),
            extra_payments,
            cents_to_euros(monthly_prorated_extra),
            cents_to_euros(extra_hours)
        ),
    };

    SalaryResolution {
        salary,
        audit_step,
        warnings,
    }
}
