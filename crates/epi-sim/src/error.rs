//! Error types for simulation runs.

use epi_core::CoreError;
use epi_model::ModelError;
use thiserror::Error;

/// Errors encountered while setting up or running a simulation.
///
/// All three kinds propagate unchanged to the caller: no retries, no
/// silent correction, no partial results.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Unrecognized model variant: {name}")]
    InvalidVariant { name: String },

    #[error("Invalid input: {what}")]
    InvalidInput { what: &'static str },

    #[error("Integration failure at t = {t}: {what}")]
    IntegrationFailure { what: String, t: f64 },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<ModelError> for SimError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::InvalidVariant { name } => SimError::InvalidVariant { name },
        }
    }
}

impl From<CoreError> for SimError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NonFinite { what, .. } => SimError::InvalidInput { what },
            CoreError::InvalidArg { what } => SimError::InvalidInput { what },
        }
    }
}
