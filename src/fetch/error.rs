//! Fetch error types.

use thiserror::Error;

/// Errors raised by the content fetcher.
///
/// Only [`FetchError::InvalidConfig`] and [`FetchError::ClientBuild`] reach callers;
/// per-candidate variants are logged and the candidate is dropped.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid fetcher configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("failed to build HTTP client: {reason}")]
    ClientBuild { reason: String },

    #[error("candidate '{path}' has no content location")]
    MissingLocation { path: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {status}")]
    Status { status: u16 },

    #[error("timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u128 },
}

impl FetchError {
    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidConfig { .. } => "invalid_config",
            FetchError::ClientBuild { .. } => "client_build",
            FetchError::MissingLocation { .. } => "missing_location",
            FetchError::Request(_) => "request",
            FetchError::Status { .. } => "status",
            FetchError::Timeout { .. } => "timeout",
        }
    }
}
