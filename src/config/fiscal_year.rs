//! Fiscal constants for the 2025 tax year.

use super::types::{
    ContributionRates, FiscalParameters, PersonalMinimums, TaxBracket, TaxScale,
    WorkIncomeReduction,
};

/// Hours per month assumed when the contract does not state them.
pub const DEFAULT_MONTHLY_HOURS: u32 = 160;

/// General regime contribution rates for 2025.
pub const CONTRIBUTION_RATES_2025: ContributionRates = ContributionRates {
    worker_common_contingencies: 470,
    worker_unemployment: 155,
    worker_training: 10,
    employer_common_contingencies: 2_360,
    employer_unemployment: 550,
    employer_training: 60,
    employer_fogasa: 20,
    // CNAE dependent, 1.5% is the generic office tariff
    employer_accidents: 150,
};

/// Reduction for income from work (art. 20 LIRPF).
pub const WORK_INCOME_REDUCTION_2025: WorkIncomeReduction = WorkIncomeReduction {
    max_reduction: 556_500,
    min_reduction: 200_000,
    threshold_start: 1_404_750,
    threshold_end: 1_770_750,
    slope: 3_400,
};

/// Personal and family minimums (arts. 57-60 LIRPF).
pub const PERSONAL_MINIMUMS_2025: PersonalMinimums = PersonalMinimums {
    personal: 555_000,
    first_child: 240_000,
    second_child: 270_000,
    third_child: 400_000,
    fourth_and_further_child: 450_000,
    disability: 300_000,
    severe_disability: 900_000,
    disability_assistance: 300_000,
    ascendant_over_65: 115_000,
    disabled_ascendant: 255_000,
};

/// Combined state and regional IRPF scale for 2025.
pub const TAX_BRACKETS_2025: [TaxBracket; 6] = [
    TaxBracket::bounded(1_245_000, 1_900),
    TaxBracket::bounded(2_020_000, 2_400),
    TaxBracket::bounded(3_520_000, 3_000),
    TaxBracket::bounded(6_000_000, 3_700),
    TaxBracket::bounded(30_000_000, 4_500),
    TaxBracket::unbounded(4_700),
];

impl FiscalParameters {
    /// The parameter set for the 2025 Spanish fiscal year.
    ///
    /// # Example
    ///
    /// ```
    /// use nomina_engine::config::FiscalParameters;
    ///
    /// let params = FiscalParameters::spain_2025();
    /// assert_eq!(params.fiscal_year, 2025);
    /// assert_eq!(params.contribution_rates.worker_common_contingencies, 470);
    /// ```
    pub fn spain_2025() -> Self {
        Self {
            fiscal_year: 2025,
            default_monthly_hours: DEFAULT_MONTHLY_HOURS,
            contribution_rates: CONTRIBUTION_RATES_2025,
            work_income_reduction: WORK_INCOME_REDUCTION_2025,
            personal_minimums: PERSONAL_MINIMUMS_2025,
            tax_scale: TaxScale::from_validated(TAX_BRACKETS_2025.to_vec()),
        }
    }
}

impl Default for FiscalParameters {
    fn default() -> Self {
        Self::spain_2025()
    }
}
