use std::sync::Arc;

use futures_util::future::join_all;
use reqwest::StatusCode;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use super::ContentFetcher;
use super::config::FetcherConfig;
use super::error::FetchError;
use crate::model::{CandidateFile, FetchedContent};

/// Fetches candidate bodies over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpContentFetcher {
    client: reqwest::Client,
    config: FetcherConfig,
    limiter: Option<Arc<Semaphore>>,
}

impl HttpContentFetcher {
    /// Builds the fetcher and its HTTP client.
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::ClientBuild {
                reason: e.to_string(),
            })?;

        Ok(Self::with_client(client, config))
    }

    /// Wraps an existing client (shares its connection pool).
    pub fn with_client(client: reqwest::Client, config: FetcherConfig) -> Self {
        let limiter = config
            .max_concurrency
            .map(|limit| Arc::new(Semaphore::new(limit)));

        Self {
            client,
            config,
            limiter,
        }
    }

    /// Returns the fetcher configuration.
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetches one candidate. Any status other than 200 is an error.
    pub async fn fetch_one(&self, candidate: &CandidateFile) -> Result<FetchedContent, FetchError> {
        let url = candidate
            .location()
            .ok_or_else(|| FetchError::MissingLocation {
                path: candidate.path.clone(),
            })?;

        let _permit = match &self.limiter {
            // The semaphore is never closed, so acquire only fails if that changes.
            Some(limiter) => Some(limiter.acquire().await.map_err(|e| {
                FetchError::InvalidConfig {
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };

        match tokio::time::timeout(self.config.timeout, self.download(url)).await {
            Ok(body) => Ok(FetchedContent::new(candidate.path.clone(), body?)),
            Err(_) => Err(FetchError::Timeout {
                timeout_ms: self.config.timeout.as_millis(),
            }),
        }
    }

    async fn download(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

impl ContentFetcher for HttpContentFetcher {
    async fn fetch_all(&self, candidates: &[CandidateFile]) -> Vec<FetchedContent> {
        let results = join_all(candidates.iter().map(|candidate| async move {
            match self.fetch_one(candidate).await {
                Ok(content) => {
                    debug!(
                        path = %candidate.path,
                        bytes = content.raw_text.len(),
                        "Fetched candidate"
                    );
                    Some(content)
                }
                Err(e @ FetchError::MissingLocation { .. }) => {
                    warn!(path = %candidate.path, name = %candidate.name, error = %e, "Skipping candidate");
                    None
                }
                Err(e) => {
                    debug!(
                        path = %candidate.path,
                        kind = e.kind(),
                        error = %e,
                        "Candidate fetch failed, skipping"
                    );
                    None
                }
            }
        }))
        .await;

        let fetched: Vec<FetchedContent> = results.into_iter().flatten().collect();

        info!(
            requested = candidates.len(),
            fetched = fetched.len(),
            "Candidate fetch complete"
        );

        fetched
    }
}
