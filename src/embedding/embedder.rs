use std::sync::Arc;

use super::error::EmbeddingError;

/// Text → fixed-length vector.
///
/// Implementations must be deterministic for identical input and safe to call from
/// several blocking workers at once.
pub trait Embedder: Send + Sync {
    /// Embeds `text`. May return the zero vector for text without tokens.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Length of every vector returned by [`Embedder::embed`].
    fn embedding_dim(&self) -> usize;

    /// Returns `true` when no real model backs this embedder.
    fn is_stub(&self) -> bool {
        false
    }
}

impl<T: Embedder + ?Sized> Embedder for Arc<T> {
    #[inline]
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }

    #[inline]
    fn embedding_dim(&self) -> usize {
        (**self).embedding_dim()
    }

    #[inline]
    fn is_stub(&self) -> bool {
        (**self).is_stub()
    }
}
