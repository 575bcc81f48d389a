//! Calculation logic for the payroll engine.
//!
//! This module contains the pipeline stages in dependency order: salary
//! resolution, contribution bases, IRPF assessment, Social Security
//! contributions, and the payroll assembly that composes them. Every
//! function is pure and uses integer arithmetic with truncating division.

mod contribution_base;
mod irpf;
mod payroll;
mod salary;
mod social_security;

pub use contribution_base::{
    ContributionBaseResult, ContributionBases, bccc, bccp, calculate_contribution_bases,
};
pub use irpf::{
    IrpfAssessment, IrpfResult, annual_irpf, assess_irpf, children_minimum, effective_rate,
    personal_and_family_minimum, progressive_tax, taxable_base, work_income_reduction,
};
pub use payroll::{calculate_payroll, generate_payroll_output};
pub use salary::{
    MONTHS_PER_YEAR, PersonalComplement, PersonalComplementSource, ResolvedSalary,
    SalaryResolution, extra_hours_pay, resolve_personal_complement, resolve_salary,
};
pub use social_security::{
    SocialSecurityResult, apply_rate, calculate_contributions, calculate_social_security,
};
