//! In-memory result cache.
//!
//! Keys are fingerprints from [`crate::hashing::fingerprint`]; values are complete
//! [`MatchResult`]s. Eviction is LRU-ish by capacity, with an optional TTL.

use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;

use crate::constants::DEFAULT_CACHE_CAPACITY;
use crate::model::MatchResult;

/// Key/value contract the matcher needs from a cache store.
///
/// `get` has no side effects and never fails: a backend error is a miss.
/// `set` is best effort and overwrites any existing entry.
pub trait ResultCache: Send + Sync {
    /// Returns the stored result for `key`, if any.
    fn get(&self, key: &str) -> Option<MatchResult>;

    /// Stores `value` under `key`.
    fn set(&self, key: &str, value: MatchResult);
}

/// Sizing for [`InMemoryResultCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCacheConfig {
    /// Max number of entries.
    pub capacity: u64,
    /// Entry lifetime; `None` keeps entries until evicted by capacity.
    pub ttl: Option<Duration>,
}

impl Default for ResultCacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            ttl: None,
        }
    }
}

impl ResultCacheConfig {
    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// moka-backed [`ResultCache`].
pub struct InMemoryResultCache {
    entries: Cache<String, MatchResult>,
}

impl InMemoryResultCache {
    /// Creates a cache with the default capacity and no TTL.
    #[inline]
    pub fn new() -> Self {
        Self::with_config(&ResultCacheConfig::default())
    }

    /// Creates a cache with a max entry capacity.
    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self::with_config(&ResultCacheConfig::default().with_capacity(capacity))
    }

    /// Creates a cache from a config.
    pub fn with_config(config: &ResultCacheConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.capacity);
        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }
        Self {
            entries: builder.build(),
        }
    }

    /// Returns the number of cached entries (approximate until pending tasks run).
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Returns `true` if the cache is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    /// Returns `true` if `key` is cached.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes an entry.
    #[inline]
    pub fn remove(&self, key: &str) -> Option<MatchResult> {
        self.entries.remove(key)
    }

    /// Clears all entries.
    #[inline]
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Runs pending maintenance (eviction bookkeeping, counts).
    #[inline]
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }
}

impl ResultCache for InMemoryResultCache {
    #[inline]
    fn get(&self, key: &str) -> Option<MatchResult> {
        self.entries.get(key)
    }

    #[inline]
    fn set(&self, key: &str, value: MatchResult) {
        self.entries.insert(key.to_string(), value);
    }
}

impl Default for InMemoryResultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryResultCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

#[derive(Clone)]
/// Shared handle to an [`InMemoryResultCache`].
pub struct ResultCacheHandle {
    inner: Arc<InMemoryResultCache>,
}

impl ResultCacheHandle {
    /// Creates a handle with default capacity.
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(InMemoryResultCache::new()),
        }
    }

    /// Creates a handle with a specific capacity.
    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            inner: Arc::new(InMemoryResultCache::with_capacity(capacity)),
        }
    }

    /// Creates a handle from a config.
    #[inline]
    pub fn with_config(config: &ResultCacheConfig) -> Self {
        Self {
            inner: Arc::new(InMemoryResultCache::with_config(config)),
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len() as usize
    }

    /// Returns `true` if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns `true` if `key` is cached.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Removes an entry.
    #[inline]
    pub fn remove(&self, key: &str) -> Option<MatchResult> {
        self.inner.remove(key)
    }

    /// Clears all entries.
    #[inline]
    pub fn clear(&self) {
        self.inner.clear();
    }

    /// Runs pending maintenance tasks.
    #[inline]
    pub fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks();
    }

    /// Returns the number of strong references to the underlying cache.
    #[inline]
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl ResultCache for ResultCacheHandle {
    #[inline]
    fn get(&self, key: &str) -> Option<MatchResult> {
        self.inner.get(key)
    }

    #[inline]
    fn set(&self, key: &str, value: MatchResult) {
        self.inner.set(key, value)
    }
}

impl Default for ResultCacheHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResultCacheHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCacheHandle")
            .field("strong_count", &self.strong_count())
            .finish()
    }
}
