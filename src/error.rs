//! Crate-wide error type, surfaced via `thiserror` at every module boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkbenchError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("missing parameter: {0}")]
    MissingParameter(String),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("I/O error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("malformed configuration line: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<crate::machine::MachineError> for WorkbenchError {
    fn from(e: crate::machine::MachineError) -> Self {
        WorkbenchError::InvalidConfiguration(e.to_string())
    }
}

impl From<crate::plugboard::PlugboardError> for WorkbenchError {
    fn from(e: crate::plugboard::PlugboardError) -> Self {
        WorkbenchError::InvalidConfiguration(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WorkbenchError>;
