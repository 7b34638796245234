use std::time::Duration;

use super::error::FetchError;
use crate::constants::DEFAULT_FETCH_TIMEOUT_SECS;

/// Default `User-Agent` sent with content requests.
pub const DEFAULT_USER_AGENT: &str = concat!("issuescout/", env!("CARGO_PKG_VERSION"));

/// Configuration for [`HttpContentFetcher`](super::HttpContentFetcher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Deadline per candidate, covering connect through the end of the body.
    pub timeout: Duration,
    /// Max requests in flight; `None` leaves fan-out to the HTTP transport.
    pub max_concurrency: Option<usize>,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            max_concurrency: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetcherConfig {
    /// Sets the per-candidate timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Caps concurrent requests.
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit);
        self
    }

    /// Validates timeout and concurrency limit.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.timeout.is_zero() {
            return Err(FetchError::InvalidConfig {
                reason: "timeout must be greater than zero".to_string(),
            });
        }

        if self.max_concurrency == Some(0) {
            return Err(FetchError::InvalidConfig {
                reason: "max_concurrency must be greater than zero when set".to_string(),
            });
        }

        Ok(())
    }
}
