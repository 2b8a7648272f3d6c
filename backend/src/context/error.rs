//! Backend error types

use thiserror::Error;

/// Errors raised while configuring a backend
///
/// Arithmetic itself never fails: every floating-point input has an IEEE
/// result the engine can fall back to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error(
        "Unknown rounding mode '{0}' \
         (expected NEAREST, AVERAGE, AVERAGE_DET, RANDOM or RANDOM_DET)"
    )]
    UnknownRoundingMode(String),

    #[error("Invalid backend config: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::InvalidConfig(err.to_string())
    }
}
