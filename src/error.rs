//! Unified error types.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SdkError {
    /// `true` when the request was valid but the asset does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SdkError::Http(HttpError::NotFound(_)))
    }

    /// `true` for network/HTTP failures (everything under `Http` except not-found).
    pub fn is_transport(&self) -> bool {
        matches!(self, SdkError::Http(e) if !matches!(e, HttpError::NotFound(_)))
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}
