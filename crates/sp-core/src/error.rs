//! Error types for SlotPulse

use thiserror::Error;

/// Core error type
///
/// Every variant is a precondition violation on the caller's side. None of
/// them is retried; they surface straight to whoever drives the tick.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Empty batch: aggregation requires at least one spin")]
    EmptyBatch,

    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    /// Shorthand for an `InvalidConfiguration` built from anything printable
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

/// Result type alias
pub type SimResult<T> = Result<T, SimError>;
