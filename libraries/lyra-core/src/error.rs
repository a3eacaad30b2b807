/// Core error types for Lyra
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Lyra
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Telemetry sink failure (non-fatal: callers log and drop)
    #[error("Telemetry error: {0}")]
    Telemetry(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Create a telemetry error from any displayable cause
    pub fn telemetry(cause: impl std::fmt::Display) -> Self {
        Self::Telemetry(cause.to_string())
    }
}
