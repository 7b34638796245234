//! IssueScout library crate (used by the server and integration tests).
//!
//! Ranks a repository's candidate files by semantic similarity to an issue
//! report: issue and file texts are embedded, compared by cosine similarity,
//! thresholded, sorted, and cached under a fingerprint of the request.
//!
//! # Public API Surface
//!
//! ## Core
//! - [`IssueMatcher`], [`MatcherConfig`] - The matching pipeline
//! - [`IssueQuery`], [`CandidateFile`], [`MatchResult`], [`FileMatch`] - Request/result types
//! - [`Config`], [`ConfigError`] - Server configuration
//!
//! ## Components
//! - [`SentenceEmbedder`], [`EmbedderConfig`] - Embedding generation (with stub mode)
//! - [`HttpContentFetcher`], [`FetcherConfig`] - Concurrent candidate retrieval
//! - [`ResultCacheHandle`], [`ResultCacheConfig`] - In-memory result cache
//! - [`fingerprint`] - Cache keys
//!
//! ## Test/Mock Support
//! [`MockContentFetcher`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod fetch;
pub mod gateway;
pub mod hashing;
pub mod matcher;
pub mod model;

pub use cache::{InMemoryResultCache, ResultCache, ResultCacheConfig, ResultCacheHandle};
pub use config::{Config, ConfigError};
pub use embedding::{
    Embedder, EmbedderConfig, EmbeddingError, SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN,
    SentenceEmbedder, preprocess_content,
};
#[cfg(any(test, feature = "mock"))]
pub use fetch::MockContentFetcher;
pub use fetch::{ContentFetcher, FetchError, FetcherConfig, HttpContentFetcher};
pub use hashing::{fingerprint, fingerprint_candidates};
pub use matcher::{
    IssueMatcher, MatcherConfig, MatcherError, cosine_similarity, rank_matches, round_score,
};
pub use model::{CandidateFile, FetchedContent, FileMatch, IssueQuery, MatchResult};
