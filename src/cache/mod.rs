//! Process-wide cache of computed match results.

pub mod result;


pub use result::{InMemoryResultCache, ResultCache, ResultCacheConfig, ResultCacheHandle};
