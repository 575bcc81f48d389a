//! Payroll input model.
//!
//! [`PayrollInput`] carries everything the pipeline needs about one
//! employee's contract and family situation for a monthly payslip.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest absolute monetary amount, in cents, accepted by [`PayrollInput::validate`].
///
/// With every amount at this cap, 64 complements, one ordinary hour a month
/// and 10,000 extra hours, the largest figure on the payslip (BCCP) is about
/// 6.6e16 cents, so no figure of a validated input reaches the `i64` bounds
/// where the pipeline saturates.
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000_000;

/// Largest number of extra hours accepted by [`PayrollInput::validate`].
pub const MAX_EXTRA_HOURS: u32 = 10_000;

/// Largest number of extra payments per year accepted by [`PayrollInput::validate`].
pub const MAX_EXTRA_PAYMENTS: u32 = 12;

/// Largest number of salary complements accepted by [`PayrollInput::validate`].
pub const MAX_SALARY_COMPLEMENTS: usize = 64;

/// The input record for one payroll calculation.
///
/// All monetary values are integer cents. Numeric fields left at zero are
/// treated as unset and trigger the fallback derivations of the salary
/// resolver (no personal complement reconciliation, default monthly hours,
/// hourly rate derived from the monthly gross).
///
/// # Example
///
/// ```
/// use nomina_engine::models::PayrollInput;
///
/// let input = PayrollInput {
///     base_salary: 200_000,
///     number_of_extra_payments: 2,
///     ..Default::default()
/// };
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollInput {
    /// Monthly base salary.
    pub base_salary: i64,
    /// Additional taxable monthly complements.
    pub salary_complements: Vec<i64>,
    /// Monthly personal complement, zero to derive it from `gross_salary`.
    pub personal_complement: i64,
    /// Target total annual gross salary, zero when not agreed.
    pub gross_salary: i64,
    /// Extra payments per year (e.g. 2 for summer and Christmas).
    pub number_of_extra_payments: u32,
    /// Extra hours worked in the month.
    pub number_of_extra_hours: u32,
    /// Pay per extra hour, zero to derive it from the monthly gross.
    pub extra_hour_rate: i64,
    /// Ordinary hours per month, zero for the default.
    pub monthly_hours: u32,
    /// Number of dependent children.
    pub number_of_children: u32,
    /// The taxpayer has a recognised disability.
    pub has_disability: bool,
    /// The disability degree is 65% or more.
    pub has_severe_disability: bool,
    /// The taxpayer needs assistance from a third party.
    pub needs_assistance: bool,
    /// The taxpayer supports ascendants over 65 years old.
    pub has_ascendants_over_65: bool,
    /// The taxpayer supports disabled ascendants.
    pub has_disabled_ascendants: bool,
}

impl PayrollInput {
    /// Sum of the salary complements.
    pub fn complements_total(&self) -> i64 {
        self.salary_complements
            .iter()
            .fold(0, |total, complement| total.saturating_add(*complement))
    }

    /// Checks that the input sits in the range where integer arithmetic is exact.
    ///
    /// The pipeline never rejects data on its own: out-of-range values are
    /// clamped and sums saturate at the `i64` bounds. Callers that accept
    /// input from outside (the HTTP layer, for instance) run this first so
    /// that every figure they get back is exact rather than saturated.
    pub fn validate(&self) -> EngineResult<()> {
        check_amount("base_salary", self.base_salary)?;
        check_amount("personal_complement", self.personal_complement)?;
        check_amount("gross_salary", self.gross_salary)?;
        check_amount("extra_hour_rate", self.extra_hour_rate)?;

        if self.salary_complements.len() > MAX_SALARY_COMPLEMENTS {
            return Err(EngineError::InvalidInput {
                field: "salary_complements".to_string(),
                message: format!(
                    "at most {} complements are supported, got {}",
                    MAX_SALARY_COMPLEMENTS,
                    self.salary_complements.len()
                ),
            });
        }
        for (index, complement) in self.salary_complements.iter().enumerate() {
            check_amount(&format!("salary_complements[{}]", index), *complement)?;
        }

        if self.number_of_extra_payments > MAX_EXTRA_PAYMENTS {
            return Err(EngineError::InvalidInput {
                field: "number_of_extra_payments".to_string(),
                message: format!("must not exceed {}", MAX_EXTRA_PAYMENTS),
            });
        }

        if self.number_of_extra_hours > MAX_EXTRA_HOURS {
            return Err(EngineError::InvalidInput {
                field: "number_of_extra_hours".to_string(),
                message: format!("must not exceed {}", MAX_EXTRA_HOURS),
            });
        }

        Ok(())
    }
}

fn check_amount(field: &str, amount: i64) -> EngineResult<()> {
    if !(-MAX_AMOUNT_CENTS..=MAX_AMOUNT_CENTS).contains(&amount) {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!(
                "absolute value must not exceed {} cents, got {}",
                MAX_AMOUNT_CENTS, amount
            ),
        });
    }
    Ok(())
}
