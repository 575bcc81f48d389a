//! Request types for the payroll API.
//!
//! This module defines the JSON request structures for the `/payroll` endpoint.

use serde::{Deserialize, Serialize};

use crate::models::PayrollInput;

/// Request body for the `/payroll` endpoint.
///
/// Monetary values are integer cents. Every section except `salary` may be
/// omitted, in which case its fields default to zero or `false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// Identifier of the employee the payslip is for.
    pub employee_id: String,
    /// Contract salary terms.
    pub salary: SalaryRequest,
    /// Extra hours worked in the month.
    #[serde(default)]
    pub overtime: OvertimeRequest,
    /// Family situation relevant to IRPF.
    #[serde(default)]
    pub family: FamilyRequest,
}

/// Salary terms in a payroll request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRequest {
    /// Monthly base salary.
    pub base_salary: i64,
    /// Additional taxable monthly complements.
    #[serde(default)]
    pub complements: Vec<i64>,
    /// Monthly personal complement, omit to derive it from `gross_salary`.
    #[serde(default)]
    pub personal_complement: i64,
    /// Target total annual gross salary.
    #[serde(default)]
    pub gross_salary: i64,
    /// Extra payments per year.
    #[serde(default)]
    pub extra_payments: u32,
}

/// Extra hours in a payroll request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OvertimeRequest {
    /// Extra hours worked in the month.
    #[serde(default)]
    pub hours: u32,
    /// Pay per extra hour, omit to derive it from the monthly gross.
    #[serde(default)]
    pub rate: i64,
    /// Ordinary hours per month, omit for the default.
    #[serde(default)]
    pub monthly_hours: u32,
}

/// Family situation in a payroll request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FamilyRequest {
    /// Number of dependent children.
    #[serde(default)]
    pub children: u32,
    /// Taxpayer disability, if any.
    #[serde(default)]
    pub disability: Option<DisabilityRequest>,
    /// The taxpayer supports ascendants over 65 years old.
    #[serde(default)]
    pub ascendants_over_65: bool,
    /// The taxpayer supports disabled ascendants.
    #[serde(default)]
    pub disabled_ascendants: bool,
}

/// Taxpayer disability in a payroll request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisabilityRequest {
    /// Disability degree is 65% or more.
    #[serde(default)]
    pub severe: bool,
    /// Third-party assistance is required.
    #[serde(default)]
    pub needs_assistance: bool,
}

impl From<PayrollRequest> for PayrollInput {
    fn from(req: PayrollRequest) -> Self {
        let disability = req.family.disability;
        PayrollInput {
            base_salary: req.salary.base_salary,
            salary_complements: req.salary.complements,
            personal_complement: req.salary.personal_complement,
            gross_salary: req.salary.gross_salary,
            number_of_extra_payments: req.salary.extra_payments,
            number_of_extra_hours: req.overtime.hours,
            extra_hour_rate: req.overtime.rate,
            monthly_hours: req.overtime.monthly_hours,
            number_of_children: req.family.children,
            has_disability: disability.is_some(),
            has_severe_disability: disability.as_ref().is_some_and(|d| d.severe),
            needs_assistance: disability.as_ref().is_some_and(|d| d.needs_assistance),
            has_ascendants_over_65: req.family.ascendants_over_65,
            has_disabled_ascendants: req.family.disabled_ascendants,
        }
    }
}
