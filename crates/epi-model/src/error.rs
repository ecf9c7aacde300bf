//! Error types for model definitions.

use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while building a model configuration.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unrecognized model variant: {name}")]
    InvalidVariant { name: String },
}
