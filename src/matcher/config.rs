use super::error::MatcherError;
use crate::constants::{DEFAULT_EMBED_WORKERS, DEFAULT_MIN_SIMILARITY};

/// Tuning for [`IssueMatcher`](super::IssueMatcher).
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherConfig {
    /// Files must score strictly above this value.
    pub min_similarity: f32,
    /// Concurrent blocking embedding tasks.
    pub embed_workers: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_similarity: DEFAULT_MIN_SIMILARITY,
            embed_workers: DEFAULT_EMBED_WORKERS,
        }
    }
}

impl MatcherConfig {
    /// Sets the similarity threshold.
    pub fn with_min_similarity(mut self, min_similarity: f32) -> Self {
        self.min_similarity = min_similarity;
        self
    }

    /// Sets the embedding worker count.
    pub fn with_embed_workers(mut self, embed_workers: usize) -> Self {
        self.embed_workers = embed_workers;
        self
    }

    /// Validates the threshold range and worker count.
    pub fn validate(&self) -> Result<(), MatcherError> {
        if !self.min_similarity.is_finite() || !(-1.0..=1.0).contains(&self.min_similarity) {
            return Err(MatcherError::InvalidConfig {
                reason: format!(
                    "min_similarity must be within [-1, 1], got {}",
                    self.min_similarity
                ),
            });
        }

        if self.embed_workers == 0 {
            return Err(MatcherError::InvalidConfig {
                reason: "embed_workers must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
