//! Error types for the payroll engine.
//!
//! The calculation pipeline itself is total: out-of-range data is clamped,
//! never reported. These errors cover the edges around it, namely building
//! a tax scale and validating caller input before it reaches the pipeline.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use nomina_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "base_salary".to_string(),
///     message: "exceeds the supported range".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid payroll input field 'base_salary': exceeds the supported range"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A tax scale was empty, unordered or otherwise malformed.
    #[error("Invalid tax scale: {message}")]
    InvalidTaxScale {
        /// A description of what made the scale invalid.
        message: String,
    },

    /// A payroll input field was outside the domain the engine supports.
    #[error("Invalid payroll input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
