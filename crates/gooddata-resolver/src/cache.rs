//! Identifier-to-URI cache.
//!
//! Provides an LRU cache with TTL (time-to-live) support so that repeated
//! resolution of the same identifiers does not hit the catalog again.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;

use crate::config::CacheConfig;

/// A cached URI with its insertion time.
#[derive(Clone)]
struct CacheEntry {
    uri: String,
    created_at: Instant,
}

impl CacheEntry {
    fn new(uri: String) -> Self {
        Self {
            uri,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Thread-safe LRU cache mapping identifiers to URIs.
///
/// Entries older than the configured TTL are treated as missing and
/// evicted on access. When full, the least recently used identifier is
/// dropped.
///
/// # Example
///
/// ```rust
/// use gooddata_resolver::{CacheConfig, UriCache};
///
/// let cache = UriCache::new(&CacheConfig::default());
/// cache.set("label.region".to_string(), "/gdc/md/p/obj/10".to_string());
///
/// assert_eq!(cache.get("label.region").as_deref(), Some("/gdc/md/p/obj/10"));
/// assert!(cache.get("label.city").is_none());
/// ```
pub struct UriCache {
    /// The LRU cache behind a mutex for thread-safety.
    cache: Mutex<LruCache<String, CacheEntry>>,
    /// Time-to-live for cache entries.
    ttl: Duration,
}

impl UriCache {
    /// Creates a new cache with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Capacity and TTL. A `max_entries` of zero is treated as one.
    pub fn new(config: &CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            ttl: config.ttl,
        }
    }

    /// Gets the cached URI of an identifier.
    ///
    /// An expired entry is removed and reported as missing. On a hit the
    /// entry becomes the most recently used.
    ///
    /// # Arguments
    ///
    /// * `identifier` - Object identifier, e.g. `label.region`.
    ///
    /// # Returns
    ///
    /// `Some(uri)` if a valid (non-expired) entry exists, `None` otherwise.
    pub fn get(&self, identifier: &str) -> Option<String> {
        let mut cache = self.cache.lock();

        let expired = match cache.get(identifier) {
            Some(entry) if entry.is_expired(self.ttl) => true,
            Some(entry) => return Some(entry.uri.clone()),
            None => return None,
        };

        if expired {
            cache.pop(identifier);
        }
        None
    }

    /// Stores the URI of an identifier, replacing any previous entry and
    /// restarting its TTL.
    ///
    /// # Arguments
    ///
    /// * `identifier` - Object identifier.
    /// * `uri` - Its current URI.
    pub fn set(&self, identifier: String, uri: String) {
        self.cache.lock().put(identifier, CacheEntry::new(uri));
    }

    /// Checks if an identifier is cached and not expired.
    pub fn contains(&self, identifier: &str) -> bool {
        self.get(identifier).is_some()
    }

    /// Returns the number of entries, including expired ones.
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Clears all entries.
    pub fn clear(&self) {
        self.cache.lock().clear();
    }

    /// Removes all expired entries.
    pub fn cleanup_expired(&self) {
        let mut cache = self.cache.lock();
        let expired: Vec<String> = cache
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in expired {
            cache.pop(&key);
        }
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let cache = self.cache.lock();
        let total = cache.len();
        let expired = cache
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.ttl))
            .count();

        CacheStats {
            total_entries: total,
            expired_entries: expired,
            valid_entries: total - expired,
        }
    }
}

impl std::fmt::Debug for UriCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UriCache")
            .field("ttl", &self.ttl)
            .field("len", &self.len())
            .finish()
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Total number of entries.
    pub total_entries: usize,
    /// Number of expired entries.
    pub expired_entries: usize,
    /// Number of valid entries.
    pub valid_entries: usize,
}
