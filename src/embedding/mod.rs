//! Embedding generation.
//!
//! - [`Embedder`] is the capability the matcher depends on.
//! - [`sentence`] provides the candle-backed implementation (with a stub mode).
//! - [`preprocess`] is the noise filter applied to file bodies.

/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod embedder;
mod error;
/// File-content preprocessing.
pub mod preprocess;
/// Sentence embedder.
pub mod sentence;
/// Tokenizer loading helpers.
pub mod utils;

pub use embedder::Embedder;
pub use error::EmbeddingError;
pub use preprocess::preprocess_content;
pub use sentence::{EmbedderConfig, SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN, SentenceEmbedder};
