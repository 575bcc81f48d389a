//! Fiscal parameters for the payroll engine.
//!
//! Contribution rates, the work-income reduction taper, personal and family
//! minimums and the IRPF scale are fixed constants for a single fiscal year.
//! They are built once, typically at process start, and passed by reference
//! into every calculator.
//!
//! # Example
//!
//! ```
//! use nomina_engine::config::FiscalParameters;
//!
//! let params = FiscalParameters::spain_2025();
//! println!("Fiscal year: {}", params.fiscal_year);
//! ```

mod fiscal_year;
mod types;

pub use fiscal_year::{
    CONTRIBUTION_RATES_2025, DEFAULT_MONTHLY_HOURS, PERSONAL_MINIMUMS_2025, TAX_BRACKETS_2025,
    WORK_INCOME_REDUCTION_2025,
};
pub use types::{
    BASIS_POINTS_SCALE, ContributionRates, FiscalParameters, PersonalMinimums, TaxBracket,
    TaxScale, WorkIncomeReduction,
};
