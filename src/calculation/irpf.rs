//! IRPF (personal income tax) withholding calculation.
//!
//! The annual liability is derived in stages: a tapering reduction for
//! income from work, the personal and family minimum, the taxable base, and
//! a marginal bracket walk over the tax scale. The monthly withholding is the
//! annual tax spread evenly over twelve months.

use serde::Serialize;

use crate::config::{
    BASIS_POINTS_SCALE, FiscalParameters, PersonalMinimums, TaxScale, WorkIncomeReduction,
};
use crate::models::{
    AuditStep, AuditWarning, PayrollInput, basis_points_to_percent, cents_to_euros, warning_codes,
};

use super::salary::{MONTHS_PER_YEAR, ResolvedSalary, resolve_salary};
use super::social_security::{apply_rate, saturate};

/// Reduction for income from work on a given annual income.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::work_income_reduction;
/// use nomina_engine::config::WORK_INCOME_REDUCTION_2025;
///
/// assert_eq!(work_income_reduction(1_000_000, &WORK_INCOME_REDUCTION_2025), 556_500);
/// // 556,500 - (1,500,000 - 1,404,750) x 0.34
/// assert_eq!(work_income_reduction(1_500_000, &WORK_INCOME_REDUCTION_2025), 524_115);
/// assert_eq!(work_income_reduction(2_800_000, &WORK_INCOME_REDUCTION_2025), 200_000);
/// ```
pub fn work_income_reduction(annual_income: i64, reduction: &WorkIncomeReduction) -> i64 {
    if annual_income <= reduction.threshold_start {
        reduction.max_reduction
    } else if annual_income >= reduction.threshold_end {
        reduction.min_reduction
    } else {
        let excess = annual_income.saturating_sub(reduction.threshold_start);
        reduction
            .max_reduction
            .saturating_sub(apply_rate(excess, reduction.slope))
    }
}

/// Minimum for descendants: each further child is worth more, up to the fourth.
pub fn children_minimum(number_of_children: u32, minimums: &PersonalMinimums) -> i64 {
    let children = i64::from(number_of_children);
    let stepped = [
        minimums.first_child,
        minimums.second_child,
        minimums.third_child,
    ];

    let first_three = stepped
        .iter()
        .take(number_of_children.min(3) as usize)
        .fold(0_i64, |total, minimum| total.saturating_add(*minimum));
    let further = (children - 3)
        .max(0)
        .saturating_mul(minimums.fourth_and_further_child);
    first_three.saturating_add(further)
}

/// Personal and family minimum: the tax-free allowance for the taxpayer's
/// situation.
///
/// Every category is additive and uncapped.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::personal_and_family_minimum;
/// use nomina_engine::config::PERSONAL_MINIMUMS_2025;
/// use nomina_engine::models::PayrollInput;
///
/// let input = PayrollInput {
///     number_of_children: 2,
///     has_ascendants_over_65: true,
///     ..Default::default()
/// };
/// // 5,550 + 2,400 + 2,700 + 1,150
/// assert_eq!(personal_and_family_minimum(&input, &PERSONAL_MINIMUMS_2025), 1_180_000);
/// ```
pub fn personal_and_family_minimum(input: &PayrollInput, minimums: &PersonalMinimums) -> i64 {
    let mut total = minimums
        .personal
        .saturating_add(children_minimum(input.number_of_children, minimums));

    if input.has_disability {
        let degree = if input.has_severe_disability {
            minimums.severe_disability
        } else {
            minimums.disability
        };
        total = total.saturating_add(degree);
        if input.needs_assistance {
            total = total.saturating_add(minimums.disability_assistance);
        }
    }

    if input.has_ascendants_over_65 {
        total = total.saturating_add(minimums.ascendant_over_65);
    }
    if input.has_disabled_ascendants {
        total = total.saturating_add(minimums.disabled_ascendant);
    }

    total
}

/// Taxable base: income less reduction and minimum, never below zero.
pub fn taxable_base(annual_income: i64, reduction: i64, minimum: i64) -> i64 {
    annual_income
        .saturating_sub(reduction)
        .saturating_sub(minimum)
        .max(0)
}

/// Walks the tax scale, taxing each slice of the base at its bracket's rate.
///
/// Each bracket's share is truncated separately before it is added.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::progressive_tax;
/// use nomina_engine::config::FiscalParameters;
///
/// let scale = FiscalParameters::spain_2025().tax_scale;
/// assert_eq!(progressive_tax(1_245_000, &scale), 236_550);
/// assert_eq!(progressive_tax(0, &scale), 0);
/// ```
pub fn progressive_tax(base: i64, scale: &TaxScale) -> i64 {
    if base <= 0 {
        return 0;
    }

    let mut tax = 0;
    let mut previous_limit = 0;
    for bracket in scale.brackets() {
        let limit = bracket.upper_limit.unwrap_or(i64::MAX);
        tax += apply_rate(base.min(limit) - previous_limit, bracket.rate);
        if base <= limit {
            break;
        }
        previous_limit = limit;
    }
    tax
}

/// Effective rate in basis points, zero when there is no base.
pub fn effective_rate(tax: i64, base: i64) -> i64 {
    if base <= 0 {
        return 0;
    }
    saturate(i128::from(tax) * i128::from(BASIS_POINTS_SCALE) / i128::from(base))
}

/// Every intermediate figure of the IRPF assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IrpfAssessment {
    /// Annual gross with extras, the income being taxed.
    pub annual_income: i64,
    /// Reduction for income from work.
    pub work_income_reduction: i64,
    /// Personal and family minimum.
    pub personal_and_family_minimum: i64,
    /// Income left to tax.
    pub taxable_base: i64,
    /// Annual tax.
    pub annual_tax: i64,
    /// Effective rate in basis points.
    pub effective_rate: i64,
    /// Annual tax / 12.
    pub monthly_withholding: i64,
}

/// The result of the IRPF assessment, including its audit steps.
#[derive(Debug, Clone)]
pub struct IrpfResult {
    /// The assessed figures.
    pub assessment: IrpfAssessment,
    /// One step per stage, numbered from the supplied step number.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised while clamping.
    pub warnings: Vec<AuditWarning>,
}

/// Assesses IRPF for a resolved salary.
///
/// Produces three audit steps: the work-income reduction, the personal and
/// family minimum, and the bracket walk.
pub fn assess_irpf(
    salary: &ResolvedSalary,
    input: &PayrollInput,
    params: &FiscalParameters,
    step_number: u32,
) -> IrpfResult {
    let annual_income = salary.annual_gross_with_extras;
    let reduction_params = &params.work_income_reduction;

    let reduction = work_income_reduction(annual_income, reduction_params);
    let minimum = personal_and_family_minimum(input, &params.personal_minimums);
    let base = taxable_base(annual_income, reduction, minimum);
    let annual_tax = progressive_tax(base, &params.tax_scale);
    let rate = effective_rate(annual_tax, base);

    let assessment = IrpfAssessment {
        annual_income,
        work_income_reduction: reduction,
        personal_and_family_minimum: minimum,
        taxable_base: base,
        annual_tax,
        effective_rate: rate,
        monthly_withholding: annual_tax / MONTHS_PER_YEAR,
    };

    let mut warnings = Vec::new();
    if annual_income > 0 && base == 0 {
        warnings.push(AuditWarning::new(
            warning_codes::TAXABLE_BASE_FLOORED,
            format!(
                "Reduction €{} and minimum €{} exceed income €{}; taxable base set to zero",
                cents_to_euros(reduction),
                cents_to_euros(minimum),
                cents_to_euros(annual_income)
            ),
            "low",
        ));
    }

    let reduction_band = if annual_income <= reduction_params.threshold_start {
        "maximum"
    } else if annual_income >= reduction_params.threshold_end {
        "minimum"
    } else {
        "tapered"
    };

    let audit_steps = vec![
        AuditStep {
            step_number,
            rule_id: "work_income_reduction".to_string(),
            rule_name: "Work Income Reduction".to_string(),
            legal_ref: "LIRPF art. 20".to_string(),
            input: serde_json::json!({
                "annual_income": annual_income,
                "threshold_start": reduction_params.threshold_start,
                "threshold_end": reduction_params.threshold_end
            }),
            output: serde_json::json!({
                "reduction": reduction,
                "band": reduction_band
            }),
            reasoning: format!(
                "Annual income €{} gets the {} reduction: €{}",
                cents_to_euros(annual_income),
                reduction_band,
                cents_to_euros(reduction)
            ),
        },
        AuditStep {
            step_number: step_number + 1,
            rule_id: "personal_family_minimum".to_string(),
            rule_name: "Personal and Family Minimum".to_string(),
            legal_ref: "LIRPF arts. 57-60".to_string(),
            input: serde_json::json!({
                "number_of_children": input.number_of_children,
                "has_disability": input.has_disability,
                "has_severe_disability": input.has_severe_disability,
                "needs_assistance": input.needs_assistance,
                "has_ascendants_over_65": input.has_ascendants_over_65,
                "has_disabled_ascendants": input.has_disabled_ascendants
            }),
            output: serde_json::json!({
                "minimum": minimum,
                "children_minimum": children_minimum(input.number_of_children, &params.personal_minimums)
            }),
            reasoning: format!(
                "Personal and family minimum €{} for {} children",
                cents_to_euros(minimum),
                input.number_of_children
            ),
        },
        AuditStep {
            step_number: step_number + 2,
            rule_id: "progressive_tax".to_string(),
            rule_name: "Progressive Tax Scale".to_string(),
            legal_ref: "LIRPF arts. 63, 74".to_string(),
            input: serde_json::json!({
                "taxable_base": base,
                "brackets": params.tax_scale.brackets()
            }),
            output: serde_json::json!(assessment),
            reasoning: format!(
                "Tax €{} on taxable base €{} ({}% effective), €{} withheld per month",
                cents_to_euros(annual_tax),
                cents_to_euros(base),
                basis_points_to_percent(rate),
                cents_to_euros(assessment.monthly_withholding)
            ),
        },
    ];

    IrpfResult {
        assessment,
        audit_steps,
        warnings,
    }
}

/// Annual IRPF for a payroll input: `(tax, effective rate in basis points)`.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::annual_irpf;
/// use nomina_engine::config::FiscalParameters;
/// use nomina_engine::models::PayrollInput;
///
/// let input = PayrollInput {
///     base_salary: 200_000,
///     number_of_extra_payments: 2,
///     ..Default::default()
/// };
///
/// let (tax, rate) = annual_irpf(&input, &FiscalParameters::spain_2025());
/// assert_eq!(tax, 430_050);
/// assert_eq!(rate, 2_102);
/// ```
pub fn annual_irpf(input: &PayrollInput, params: &FiscalParameters) -> (i64, i64) {
    let salary = resolve_salary(input, params, 1).salary;
    let assessment = assess_irpf(&salary, input, params, 2).assessment;
    (assessment.annual_tax, assessment.effective_rate)
}
