//! Issue-to-file matching pipeline.
//!
//! ```text
//! fingerprint ─► cache hit? ──yes──► cached result
//!                   │no
//!                   ▼
//! embed issue ─► fetch all ─► preprocess ─► nothing left? ──► error result (not cached)
//!                                                 │
//!                                                 ▼
//!                  embed files (bounded) ─► rank ─► store ─► success result
//! ```
//!
//! Any fault after the cache lookup becomes an error [`MatchResult`].

pub mod config;
pub mod error;
pub mod ranking;


pub use config::MatcherConfig;
pub use error::MatcherError;
pub use ranking::{cosine_similarity, rank_matches, round_score};

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use crate::cache::ResultCache;
use crate::constants::NO_VALID_FILES_MESSAGE;
use crate::embedding::{Embedder, EmbeddingError, preprocess_content};
use crate::fetch::ContentFetcher;
use crate::hashing::fingerprint_candidates;
use crate::model::{CandidateFile, FetchedContent, IssueQuery, MatchResult};

/// Ranks candidate files against an issue.
///
/// Built once and shared: the embedder sits behind an `Arc`, and the cache and
/// fetcher are injected so tests can swap in mocks.
pub struct IssueMatcher<E, F, C>
where
    E: Embedder + ?Sized + 'static,
    F: ContentFetcher,
    C: ResultCache,
{
    embedder: Arc<E>,
    fetcher: F,
    cache: C,
    config: MatcherConfig,
    workers: Arc<Semaphore>,
}

impl<E, F, C> IssueMatcher<E, F, C>
where
    E: Embedder + ?Sized + 'static,
    F: ContentFetcher,
    C: ResultCache,
{
    /// Creates a matcher after validating `config`.
    pub fn new(
        embedder: Arc<E>,
        fetcher: F,
        cache: C,
        config: MatcherConfig,
    ) -> Result<Self, MatcherError> {
        config.validate()?;

        let workers = Arc::new(Semaphore::new(config.embed_workers));

        Ok(Self {
            embedder,
            fetcher,
            cache,
            config,
            workers,
        })
    }

    /// Returns the matcher configuration.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Returns the shared embedder.
    pub fn embedder(&self) -> &Arc<E> {
        &self.embedder
    }

    /// Returns the injected cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Returns the injected fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Ranks `candidates` against `issue`. Never fails: faults become an error result.
    #[instrument(
        skip_all,
        fields(owner = %issue.owner, repo = %issue.repo, candidates = candidates.len())
    )]
    pub async fn match_files(&self, issue: &IssueQuery, candidates: &[CandidateFile]) -> MatchResult {
        match self.try_match_files(issue, candidates).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "Issue matching failed");
                MatchResult::error(e.to_string())
            }
        }
    }

    /// Same pipeline as [`IssueMatcher::match_files`], surfacing faults as `Err`.
    pub async fn try_match_files(
        &self,
        issue: &IssueQuery,
        candidates: &[CandidateFile],
    ) -> Result<MatchResult, MatcherError> {
        let key = fingerprint_candidates(issue, candidates);

        if let Some(cached) = self.cache.get(&key) {
            info!(key = %key, status = cached.status(), "Result cache hit");
            return Ok(cached);
        }
        debug!(key = %key, "Result cache miss");

        let issue_embedding = self.embed_issue(issue).await?;

        let fetched = self.fetcher.fetch_all(candidates).await;
        let prepared = prepare_contents(fetched);
        if prepared.is_empty() {
            info!(requested = candidates.len(), "No candidate content to embed");
            return Ok(MatchResult::error(NO_VALID_FILES_MESSAGE));
        }

        let file_embeddings = self.embed_files(prepared).await?;

        let scored = file_embeddings.into_iter().filter_map(|(path, embedding)| {
            match cosine_similarity(&issue_embedding, &embedding) {
                Some(score) => {
                    debug!(path = %path, score, "Scored candidate");
                    Some((path, score))
                }
                None => {
                    debug!(path = %path, "Candidate has no usable embedding, excluded");
                    None
                }
            }
        });

        let matches = rank_matches(scored, self.config.min_similarity);
        info!(
            matches = matches.len(),
            min_similarity = self.config.min_similarity,
            "Issue matching complete"
        );

        let result = MatchResult::success(matches);
        self.cache.set(&key, result.clone());

        Ok(result)
    }

    async fn embed_issue(&self, issue: &IssueQuery) -> Result<Vec<f32>, MatcherError> {
        let text = issue.embedding_text();
        let handle = self.spawn_embedding(text).await?;
        Ok(handle.await??)
    }

    /// Embeds every prepared text, at most `embed_workers` at a time, in fetch order.
    async fn embed_files(
        &self,
        prepared: Vec<(String, String)>,
    ) -> Result<Vec<(String, Vec<f32>)>, MatcherError> {
        let mut pending: Vec<(String, JoinHandle<Result<Vec<f32>, EmbeddingError>>)> =
            Vec::with_capacity(prepared.len());

        for (path, text) in prepared {
            pending.push((path, self.spawn_embedding(text).await?));
        }

        // On the first error the remaining handles are dropped. Their blocking
        // work still runs to completion and the output is discarded.
        let mut embeddings = Vec::with_capacity(pending.len());
        for (path, handle) in pending {
            embeddings.push((path, handle.await??));
        }

        Ok(embeddings)
    }

    /// Waits for a worker permit, then embeds `text` on the blocking pool.
    async fn spawn_embedding(
        &self,
        text: String,
    ) -> Result<JoinHandle<Result<Vec<f32>, EmbeddingError>>, MatcherError> {
        let permit = self.workers.clone().acquire_owned().await?;
        let embedder = Arc::clone(&self.embedder);

        Ok(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            embedder.embed(&text)
        }))
    }
}

/// Preprocesses fetched bodies, dropping files left with no text to embed.
fn prepare_contents(fetched: Vec<FetchedContent>) -> Vec<(String, String)> {
    fetched
        .into_iter()
        .filter_map(|content| {
            let text = preprocess_content(&content.raw_text);
            if text.is_empty() {
                debug!(path = %content.path, "Candidate has no embeddable text, skipped");
                None
            } else {
                Some((content.path, text))
            }
        })
        .collect()
}
