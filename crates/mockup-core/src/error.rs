use thiserror::Error;

use crate::session::ResultId;

#[derive(Error, Debug)]
pub enum MockupError {
    #[error("No product image has been provided")]
    InputMissing,

    #[error("Could not decode image: {0}")]
    Decode(String),

    #[error("Generation failed: {reason}")]
    Generation { reason: String },

    #[error("Unknown result {0}")]
    UnknownResult(ResultId),

    #[error("Result {0} is already being regenerated")]
    RegenerationInFlight(ResultId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Superseded by a newer batch")]
    Superseded,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MockupError {
    pub fn generation(reason: impl Into<String>) -> Self {
        Self::Generation {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MockupError>;
