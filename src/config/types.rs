//! Fiscal parameter types.
//!
//! This module contains the strongly-typed constant tables the calculators
//! read from. Amounts are integer cents and rates are basis points
//! (1/10,000), so `base * rate / 10_000` yields cents.

use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// Divisor that turns `amount * basis_points` back into cents.
pub const BASIS_POINTS_SCALE: i64 = 10_000;

/// Social Security contribution rates, in basis points.
///
/// Every rate applies to the common contingencies base (BCCC) except
/// `employer_accidents`, which applies to the professional contingencies
/// base (BCCP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContributionRates {
    /// Worker share of common contingencies.
    pub worker_common_contingencies: i64,
    /// Worker share of unemployment insurance.
    pub worker_unemployment: i64,
    /// Worker share of vocational training.
    pub worker_training: i64,
    /// Employer share of common contingencies.
    pub employer_common_contingencies: i64,
    /// Employer share of unemployment insurance.
    pub employer_unemployment: i64,
    /// Employer share of vocational training.
    pub employer_training: i64,
    /// Wage Guarantee Fund (FOGASA), employer only.
    pub employer_fogasa: i64,
    /// Occupational accidents and diseases, employer only, on BCCP.
    pub employer_accidents: i64,
}

/// Tapering reduction for income from work.
///
/// Below `threshold_start` the full `max_reduction` applies, from
/// `threshold_end` upwards only `min_reduction` applies, and in between
/// the reduction falls by `slope` basis points per cent of excess income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkIncomeReduction {
    /// Reduction granted at or below the lower threshold.
    pub max_reduction: i64,
    /// Reduction granted at or above the upper threshold.
    pub min_reduction: i64,
    /// Annual income where the taper starts.
    pub threshold_start: i64,
    /// Annual income where the taper ends.
    pub threshold_end: i64,
    /// Taper slope in basis points.
    pub slope: i64,
}

/// Personal and family minimum allowances, in cents per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PersonalMinimums {
    /// Allowance every taxpayer receives.
    pub personal: i64,
    /// Allowance for the first child.
    pub first_child: i64,
    /// Allowance for the second child.
    pub second_child: i64,
    /// Allowance for the third child.
    pub third_child: i64,
    /// Allowance for the fourth and every further child.
    pub fourth_and_further_child: i64,
    /// Taxpayer disability below 65%.
    pub disability: i64,
    /// Taxpayer disability of 65% or more.
    pub severe_disability: i64,
    /// Add-on when the taxpayer needs third-party assistance.
    pub disability_assistance: i64,
    /// Ascendants over 65 years old.
    pub ascendant_over_65: i64,
    /// Disabled ascendants.
    pub disabled_ascendant: i64,
}

/// One band of a progressive tax scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxBracket {
    /// Inclusive upper limit of the band in cents, `None` for the top band.
    pub upper_limit: Option<i64>,
    /// Marginal rate for income inside this band, in basis points.
    pub rate: i64,
}

impl TaxBracket {
    /// A band ending at `upper_limit`.
    pub const fn bounded(upper_limit: i64, rate: i64) -> Self {
        Self {
            upper_limit: Some(upper_limit),
            rate,
        }
    }

    /// The open-ended top band.
    pub const fn unbounded(rate: i64) -> Self {
        Self {
            upper_limit: None,
            rate,
        }
    }
}

/// An ordered, validated progressive tax scale.
///
/// Limits are strictly increasing and only the last bracket may be (and
/// must be) unbounded, so a bracket walk always terminates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxScale {
    brackets: Vec<TaxBracket>,
}

impl TaxScale {
    /// Builds a scale, rejecting anything a bracket walk cannot handle.
    ///
    /// # Example
    ///
    /// ```
    /// use nomina_engine::config::{TaxBracket, TaxScale};
    ///
    /// let scale = TaxScale::new(vec![
    ///     TaxBracket::bounded(1_000_000, 1_000),
    ///     TaxBracket::unbounded(2_000),
    /// ])
    /// .unwrap();
    /// assert_eq!(scale.brackets().len(), 2);
    ///
    /// assert!(TaxScale::new(vec![]).is_err());
    /// ```
    pub fn new(brackets: Vec<TaxBracket>) -> EngineResult<Self> {
        let Some((last, bounded)) = brackets.split_last() else {
            return Err(EngineError::InvalidTaxScale {
                message: "scale must contain at least one bracket".to_string(),
            });
        };

        if last.upper_limit.is_some() {
            return Err(EngineError::InvalidTaxScale {
                message: "last bracket must be unbounded".to_string(),
            });
        }

        let mut previous_limit = 0;
        for (index, bracket) in bounded.iter().enumerate() {
            let Some(limit) = bracket.upper_limit else {
                return Err(EngineError::InvalidTaxScale {
                    message: format!("bracket {} is unbounded but is not the last", index),
                });
            };
            if limit <= previous_limit {
                return Err(EngineError::InvalidTaxScale {
                    message: format!(
                        "bracket {} limit {} is not above the previous limit {}",
                        index, limit, previous_limit
                    ),
                });
            }
            previous_limit = limit;
        }

        if let Some(index) = brackets
            .iter()
            .position(|b| !(0..=BASIS_POINTS_SCALE).contains(&b.rate))
        {
            return Err(EngineError::InvalidTaxScale {
                message: format!("bracket {} rate must be between 0 and 10000", index),
            });
        }

        Ok(Self { brackets })
    }

    /// Wraps brackets that are known to satisfy [`TaxScale::new`].
    pub(super) fn from_validated(brackets: Vec<TaxBracket>) -> Self {
        debug_assert!(TaxScale::new(brackets.clone()).is_ok());
        Self { brackets }
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

/// Every constant the payroll pipeline reads, for one fiscal year.
///
/// Built once (see [`FiscalParameters::spain_2025`]) and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FiscalParameters {
    /// The fiscal year these values belong to.
    pub fiscal_year: u16,
    /// Hours per month used to derive an hourly rate when none is supplied.
    pub default_monthly_hours: u32,
    /// Social Security contribution rates.
    pub contribution_rates: ContributionRates,
    /// Reduction for income from work.
    pub work_income_reduction: WorkIncomeReduction,
    /// Personal and family minimum allowances.
    pub personal_minimums: PersonalMinimums,
    /// Combined state and regional IRPF scale.
    pub tax_scale: TaxScale,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(brackets: Vec<TaxBracket>, fragment: &str) {
        match TaxScale::new(brackets) {
            Err(EngineError::InvalidTaxScale { message }) => {
                assert!(
                    message.contains(fragment),
                    "expected '{}' in '{}'",
                    fragment,
                    message
                );
            }
            other => panic!("Expected InvalidTaxScale, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_scale_keeps_order() {
        let scale = TaxScale::new(vec![
            TaxBracket::bounded(100, 1_000),
            TaxBracket::bounded(200, 2_000),
            TaxBracket::unbounded(3_000),
        ])
        .unwrap();

        let limits: Vec<Option<i64>> = scale.brackets().iter().map(|b| b.upper_limit).collect();
        assert_eq!(limits, vec![Some(100), Some(200), None]);
    }

    #[test]
    fn test_single_unbounded_bracket_is_a_flat_scale() {
        let scale = TaxScale::new(vec![TaxBracket::unbounded(1_500)]).unwrap();
        assert_eq!(scale.brackets().len(), 1);
    }

    #[test]
    fn test_empty_scale_is_rejected() {
        assert_invalid(vec![], "at least one bracket");
    }

    #[test]
    fn test_bounded_last_bracket_is_rejected() {
        assert_invalid(
            vec![TaxBracket::bounded(100, 1_000)],
            "last bracket must be unbounded",
        );
    }

    #[test]
    fn test_unbounded_middle_bracket_is_rejected() {
        assert_invalid(
            vec![
                TaxBracket::unbounded(1_000),
                TaxBracket::unbounded(2_000),
            ],
            "bracket 0 is unbounded",
        );
    }

    #[test]
    fn test_equal_limits_are_rejected() {
        assert_invalid(
            vec![
                TaxBracket::bounded(100, 1_000),
                TaxBracket::bounded(100, 2_000),
                TaxBracket::unbounded(3_000),
            ],
            "not above the previous limit",
        );
    }

    #[test]
    fn test_non_positive_first_limit_is_rejected() {
        assert_invalid(
            vec![TaxBracket::bounded(0, 1_000), TaxBracket::unbounded(2_000)],
            "not above the previous limit",
        );
    }

    #[test]
    fn test_rate_above_one_hundred_percent_is_rejected() {
        assert_invalid(
            vec![TaxBracket::bounded(100, 1_000), TaxBracket::unbounded(10_001)],
            "rate must be between",
        );
    }
}
