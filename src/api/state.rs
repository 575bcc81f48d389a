//! Application state for the payroll API.
//!
//! The state is cloned into every request, so it only holds an `Arc` to
//! parameters that never change after startup.

use std::sync::Arc;

use crate::config::FiscalParameters;

/// State shared by the payroll handlers.
///
/// Holds the fiscal parameters, built once at startup and read by every
/// request.
#[derive(Clone)]
pub struct AppState {
    /// The fiscal parameters applied to every calculation.
    params: Arc<FiscalParameters>,
}

impl AppState {
    /// Creates a new application state with the given fiscal parameters.
    pub fn new(params: FiscalParameters) -> Self {
        Self {
            params: Arc::new(params),
        }
    }

    /// Returns a reference to the fiscal parameters.
    pub fn params(&self) -> &FiscalParameters {
        &self.params
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FiscalParameters::spain_2025())
    }
}
