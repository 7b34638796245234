use std::sync::Arc;

use crate::cache::ResultCache;
use crate::embedding::Embedder;
use crate::fetch::ContentFetcher;
use crate::matcher::IssueMatcher;

/// Matcher type served by the gateway; the embedder is chosen at startup.
pub type SharedMatcher<F, C> = IssueMatcher<dyn Embedder, F, C>;

pub struct HandlerState<F, C>
where
    F: ContentFetcher + 'static,
    C: ResultCache + 'static,
{
    pub matcher: Arc<SharedMatcher<F, C>>,
}

// Manual impl: cloning shares the matcher, so `F` and `C` need not be `Clone`.
impl<F, C> Clone for HandlerState<F, C>
where
    F: ContentFetcher + 'static,
    C: ResultCache + 'static,
{
    fn clone(&self) -> Self {
        Self {
            matcher: Arc::clone(&self.matcher),
        }
    }
}

impl<F, C> HandlerState<F, C>
where
    F: ContentFetcher + 'static,
    C: ResultCache + 'static,
{
    pub fn new(matcher: SharedMatcher<F, C>) -> Self {
        Self {
            matcher: Arc::new(matcher),
        }
    }

    /// Returns `true` when the matcher runs without a real model.
    pub fn embedder_is_stub(&self) -> bool {
        self.matcher.embedder().is_stub()
    }
}
