//! Candidate content retrieval.
//!
//! [`ContentFetcher::fetch_all`] never fails as a whole: candidates that time
//! out, return a non-200 status, or lack a location are dropped and the rest
//! are returned in input order.

pub mod config;
pub mod error;
pub mod http;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use config::{DEFAULT_USER_AGENT, FetcherConfig};
pub use error::FetchError;
pub use http::HttpContentFetcher;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockContentFetcher;

use std::future::Future;

use crate::model::{CandidateFile, FetchedContent};

/// Fetches the raw text of candidate files concurrently.
pub trait ContentFetcher: Send + Sync {
    /// Returns the successfully fetched candidates, preserving input order.
    fn fetch_all(
        &self,
        candidates: &[CandidateFile],
    ) -> impl Future<Output = Vec<FetchedContent>> + Send;
}
