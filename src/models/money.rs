//! Rendering of integer cents and basis points as decimals.

use rust_decimal::Decimal;

/// Converts integer cents to euros.
///
/// # Example
///
/// ```
/// use nomina_engine::models::cents_to_euros;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(cents_to_euros(200_000), Decimal::from_str("2000.00").unwrap());
/// assert_eq!(cents_to_euros(-5).to_string(), "-0.05");
/// ```
pub fn cents_to_euros(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Converts basis points to a percentage (1,900 bp is 19.00%).
pub fn basis_points_to_percent(basis_points: i64) -> Decimal {
    Decimal::new(basis_points, 2)
}
