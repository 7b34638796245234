//! Cross-cutting, shared constants.
//!
//! Component configs default to these values; prefer overriding through
//! [`crate::config::Config`] rather than editing them.

/// Output dimension of the default sentence-transformer (MiniLM-class models).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens fed to the encoder (BERT position embedding limit).
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Files must score strictly above this cosine similarity to be reported.
pub const DEFAULT_MIN_SIMILARITY: f32 = 0.1;

/// Decimal places kept in reported similarity scores.
pub const SCORE_DECIMALS: i32 = 2;

/// Per-candidate fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;

/// Blocking workers used for file embeddings.
pub const DEFAULT_EMBED_WORKERS: usize = 5;

/// Max entries held by the in-memory result cache.
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Message returned when no candidate could be fetched.
pub const NO_VALID_FILES_MESSAGE: &str = "No valid files to analyze";
