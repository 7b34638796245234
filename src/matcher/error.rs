use thiserror::Error;

use crate::embedding::EmbeddingError;

/// Faults raised inside the matching pipeline.
///
/// [`IssueMatcher::match_files`](super::IssueMatcher::match_files) turns these into
/// an error [`MatchResult`](crate::model::MatchResult); only
/// [`IssueMatcher::try_match_files`](super::IssueMatcher::try_match_files) returns them.
#[derive(Debug, Error)]
pub enum MatcherError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error("embedding worker failed: {reason}")]
    WorkerFailed { reason: String },

    #[error("invalid matcher configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<tokio::task::JoinError> for MatcherError {
    fn from(err: tokio::task::JoinError) -> Self {
        let reason = if err.is_panic() {
            "embedding task panicked".to_string()
        } else {
            err.to_string()
        };
        MatcherError::WorkerFailed { reason }
    }
}

impl From<tokio::sync::AcquireError> for MatcherError {
    fn from(err: tokio::sync::AcquireError) -> Self {
        MatcherError::WorkerFailed {
            reason: err.to_string(),
        }
    }
}
