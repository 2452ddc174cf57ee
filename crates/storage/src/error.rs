//! Storage error types.

use thiserror::Error;
use types::EventError;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Backend could not be reached or failed an I/O call.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store operation `{operation}` exceeded {timeout_ms} ms")]
    Timeout {
        operation: &'static str,
        timeout_ms: u64,
    },

    #[error("collection '{collection}' is corrupt: {reason}")]
    Corrupt { collection: String, reason: String },

    #[error("invalid collection name '{0}'")]
    InvalidCollection(String),

    #[error("encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// Rejected schedule payload; nothing was written.
    #[error("invalid schedule: {0}")]
    InvalidEvents(#[from] EventError),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl StoreError {
    /// Whether retrying the same call later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Timeout { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
