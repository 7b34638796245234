use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::ContentFetcher;
use crate::model::{CandidateFile, FetchedContent};

#[derive(Debug, Clone)]
enum MockResponse {
    Body(String),
    Fail,
}

#[derive(Debug, Default)]
struct MockState {
    responses: Mutex<HashMap<String, MockResponse>>,
    fetch_all_calls: AtomicUsize,
    requests: AtomicUsize,
    delay: Mutex<Option<Duration>>,
}

/// In-memory [`ContentFetcher`] keyed by candidate path.
///
/// Paths without a canned response fail like an unreachable URL. Clones share
/// state, so a test can keep a handle to read the counters.
#[derive(Debug, Clone, Default)]
pub struct MockContentFetcher {
    state: Arc<MockState>,
}

impl MockContentFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` for `path`.
    pub fn with_body(self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.set_body(path, body);
        self
    }

    /// Fails every request for `path`.
    pub fn with_failure(self, path: impl Into<String>) -> Self {
        self.state
            .responses
            .lock()
            .insert(path.into(), MockResponse::Fail);
        self
    }

    /// Sleeps before answering each request.
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.state.delay.lock() = Some(delay);
        self
    }

    /// Replaces the body served for `path`.
    pub fn set_body(&self, path: impl Into<String>, body: impl Into<String>) {
        self.state
            .responses
            .lock()
            .insert(path.into(), MockResponse::Body(body.into()));
    }

    /// Number of `fetch_all` invocations.
    pub fn fetch_all_calls(&self) -> usize {
        self.state.fetch_all_calls.load(Ordering::SeqCst)
    }

    /// Number of individual candidate requests issued.
    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    async fn fetch_one(&self, candidate: &CandidateFile) -> Option<FetchedContent> {
        candidate.location()?;
        self.state.requests.fetch_add(1, Ordering::SeqCst);

        let delay = *self.state.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let response = self.state.responses.lock().get(&candidate.path).cloned();
        match response {
            Some(MockResponse::Body(body)) => Some(FetchedContent::new(&candidate.path, body)),
            Some(MockResponse::Fail) | None => None,
        }
    }
}

impl ContentFetcher for MockContentFetcher {
    async fn fetch_all(&self, candidates: &[CandidateFile]) -> Vec<FetchedContent> {
        self.state.fetch_all_calls.fetch_add(1, Ordering::SeqCst);

        let results =
            futures_util::future::join_all(candidates.iter().map(|c| self.fetch_one(c))).await;

        results.into_iter().flatten().collect()
    }
}
