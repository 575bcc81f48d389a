//! Payroll assembly.
//!
//! Runs every stage in dependency order (salary, contribution bases, IRPF,
//! Social Security) and composes the payslip. Net salary is always
//! `monthly_gross_with_extras - irpf_amount - ss_contributions.total_worker`.

use crate::config::FiscalParameters;
use crate::models::{
    AuditStep, AuditTrace, PayrollCalculation, PayrollInput, PayrollOutput, cents_to_euros,
};

use super::contribution_base::calculate_contribution_bases;
use super::irpf::assess_irpf;
use super::salary::resolve_salary;
use super::social_security::calculate_social_security;

/// Calculates a payslip together with its audit trace.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::calculate_payroll;
/// use nomina_engine::config::FiscalParameters;
/// use nomina_engine::models::PayrollInput;
///
/// let input = PayrollInput {
///     base_salary: 200_000,
///     number_of_extra_payments: 2,
///     ..Default::default()
/// };
///
/// let calculation = calculate_payroll(&input, &FiscalParameters::spain_2025());
/// assert_eq!(calculation.output.net_salary, 182_681);
/// assert_eq!(calculation.audit_trace.steps.len(), 7);
/// ```
pub fn calculate_payroll(input: &PayrollInput, params: &FiscalParameters) -> PayrollCalculation {
    let mut trace = AuditTrace::default();

    let salary_result = resolve_salary(input, params, trace.next_step_number());
    let salary = salary_result.salary;
    trace.steps.push(salary_result.audit_step);
    trace.warnings.extend(salary_result.warnings);

    let bases_result = calculate_contribution_bases(&salary, trace.next_step_number());
    let bases = bases_result.bases;
    trace.steps.push(bases_result.audit_step);

    let irpf_result = assess_irpf(&salary, input, params, trace.next_step_number());
    let irpf = irpf_result.assessment;
    trace.steps.extend(irpf_result.audit_steps);
    trace.warnings.extend(irpf_result.warnings);

    let ss_result =
        calculate_social_security(&bases, &params.contribution_rates, trace.next_step_number());
    let ss = ss_result.contributions;
    trace.steps.push(ss_result.audit_step);

    let monthly_gross_with_extras = salary
        .monthly_gross
        .saturating_add(salary.monthly_prorated_extra)
        .saturating_add(salary.extra_hours_pay);
    let net_salary = monthly_gross_with_extras
        .saturating_sub(irpf.monthly_withholding)
        .saturating_sub(ss.total_worker);

    trace.steps.push(AuditStep {
        step_number: trace.next_step_number(),
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        legal_ref: "ET art. 29".to_string(),
        input: serde_json::json!({
            "monthly_gross_with_extras": monthly_gross_with_extras,
            "irpf_amount": irpf.monthly_withholding,
            "ss_total_worker": ss.total_worker
        }),
        output: serde_json::json!({
            "net_salary": net_salary
        }),
        reasoning: format!(
            "€{} - IRPF €{} - Social Security €{} = €{}",
            cents_to_euros(monthly_gross_with_extras),
            cents_to_euros(irpf.monthly_withholding),
            cents_to_euros(ss.total_worker),
            cents_to_euros(net_salary)
        ),
    });

    let output = PayrollOutput {
        base_salary: input.base_salary,
        salary_complements: input.salary_complements.clone(),
        personal_complement: salary.personal_complement,
        extra_hours_pay: salary.extra_hours_pay,
        monthly_gross_salary: salary.monthly_gross,
        monthly_prorated_extra_pay: salary.monthly_prorated_extra,
        monthly_gross_with_extras,
        base_bccc: bases.bccc,
        base_bccp: bases.bccp,
        irpf_amount: irpf.monthly_withholding,
        irpf_effective_rate: irpf.effective_rate,
        ss_contributions: ss,
        net_salary,
    };

    PayrollCalculation {
        output,
        audit_trace: trace,
    }
}

/// Calculates every payslip figure for `input`.
///
/// This is the plain entry point for callers that do not need the audit
/// trace. It is total: any input yields a complete, self-consistent record.
pub fn generate_payroll_output(input: &PayrollInput, params: &FiscalParameters) -> PayrollOutput {
    calculate_payroll(input, params).output
}
