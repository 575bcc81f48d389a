//! Payroll output models.
//!
//! This module contains [`PayrollOutput`], the record the pipeline produces
//! for one monthly payslip, together with the Social Security breakdown
//! [`SSCotisations`] and the [`PayrollCalculation`] wrapper that pairs the
//! output with its audit trace.

use serde::{Deserialize, Serialize};

use super::AuditTrace;

/// Social Security contributions for one payslip, split by concept and by
/// contributor.
///
/// The three totals are sums of the already-truncated concept amounts.
///
/// # Example
///
/// ```
/// use nomina_engine::models::SSCotisations;
///
/// let ss = SSCotisations::from_concepts(100, 30, 2, 500, 120, 13, 4, 35);
/// assert_eq!(ss.total_worker, 132);
/// assert_eq!(ss.total_employer, 672);
/// assert_eq!(ss.total, 804);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SSCotisations {
    /// Common contingencies, worker share.
    pub worker_cc: i64,
    /// Unemployment, worker share.
    pub worker_unemployment: i64,
    /// Vocational training, worker share.
    pub worker_training: i64,

    /// Common contingencies, employer share.
    pub employer_cc: i64,
    /// Unemployment, employer share.
    pub employer_unemployment: i64,
    /// Vocational training, employer share.
    pub employer_training: i64,
    /// Wage Guarantee Fund (FOGASA).
    pub employer_fogasa: i64,
    /// Occupational accidents and diseases.
    pub employer_accidents: i64,

    /// Everything withheld from the worker.
    pub total_worker: i64,
    /// Everything paid on top by the employer.
    pub total_employer: i64,
    /// `total_worker + total_employer`.
    pub total: i64,
}

impl SSCotisations {
    /// Builds the breakdown from the eight concept amounts, deriving the totals.
    #[allow(clippy::too_many_arguments)]
    pub fn from_concepts(
        worker_cc: i64,
        worker_unemployment: i64,
        worker_training: i64,
        employer_cc: i64,
        employer_unemployment: i64,
        employer_training: i64,
        employer_fogasa: i64,
        employer_accidents: i64,
    ) -> Self {
        let total_worker = worker_cc
            .saturating_add(worker_unemployment)
            .saturating_add(worker_training);
        let total_employer = employer_cc
            .saturating_add(employer_unemployment)
            .saturating_add(employer_training)
            .saturating_add(employer_fogasa)
            .saturating_add(employer_accidents);

        Self {
            worker_cc,
            worker_unemployment,
            worker_training,
            employer_cc,
            employer_unemployment,
            employer_training,
            employer_fogasa,
            employer_accidents,
            total_worker,
            total_employer,
            total: total_worker.saturating_add(total_employer),
        }
    }
}

/// Every figure of a monthly payslip.
///
/// All monetary values are integer cents, rates are basis points.
/// `net_salary` always equals
/// `monthly_gross_with_extras - irpf_amount - ss_contributions.total_worker`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollOutput {
    /// Monthly base salary, as supplied.
    pub base_salary: i64,
    /// Salary complements, as supplied.
    pub salary_complements: Vec<i64>,
    /// Personal complement actually applied (explicit or reconciled).
    pub personal_complement: i64,
    /// Pay for the month's extra hours.
    pub extra_hours_pay: i64,
    /// Base salary plus personal complement plus complements.
    pub monthly_gross_salary: i64,
    /// Extra payments spread over twelve months.
    pub monthly_prorated_extra_pay: i64,
    /// Monthly gross plus prorated extra pay plus extra-hours pay.
    pub monthly_gross_with_extras: i64,

    /// Contribution base for common contingencies.
    pub base_bccc: i64,
    /// Contribution base for professional contingencies.
    pub base_bccp: i64,

    /// Monthly IRPF withholding.
    pub irpf_amount: i64,
    /// Effective IRPF rate over the annual taxable base.
    pub irpf_effective_rate: i64,

    /// Social Security breakdown.
    pub ss_contributions: SSCotisations,

    /// What the employee is paid.
    pub net_salary: i64,
}

/// A payroll output together with the audit trace that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCalculation {
    /// The payslip figures.
    pub output: PayrollOutput,
    /// Every step and warning recorded on the way.
    pub audit_trace: AuditTrace,
}
