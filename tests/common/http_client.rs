//! HTTP client helpers for tests.

use issuescout::gateway::AnalyzeIssueRequest;
use issuescout::model::{CandidateFile, IssueQuery, MatchResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    /// Posts to `/analyse-issue`; returns the HTTP status, status header, and parsed result.
    pub async fn analyse_issue(
        &self,
        issue: &IssueQuery,
        files: &[CandidateFile],
    ) -> Result<(u16, String, MatchResult), TestClientError> {
        let request = AnalyzeIssueRequest {
            owner: issue.owner.clone(),
            repo: issue.repo.clone(),
            filtered_files: files.to_vec(),
            issue_details: issue.clone(),
        };

        let resp = self
            .client
            .post(self.url("/analyse-issue"))
            .json(&request)
            .send()
            .await?;

        let status_header = resp
            .headers()
            .get("x-issuescout-status")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        match resp.status().as_u16() {
            status @ (200 | 422) if status_header != "invalid_request" => {
                Ok((status, status_header, resp.json().await?))
            }
            400 | 415 | 422 => Err(TestClientError::BadRequest(resp.text().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        self.get_json("/health").await
    }

    pub async fn welcome(&self) -> Result<WelcomeResponse, TestClientError> {
        self.get_json("/").await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, TestClientError> {
        let resp = self.client.get(self.url(path)).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WelcomeResponse {
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0} - Body: {1}")]
    UnexpectedStatus(u16, String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}
