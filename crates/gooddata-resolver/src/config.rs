//! Configuration types for the qualifier resolver.

use std::time::Duration;

/// Default number of identifiers sent to the catalog in one request.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Configuration for the qualifier resolver.
///
/// # Example
///
/// ```rust
/// use gooddata_resolver::{CacheConfig, ResolverConfig};
///
/// let config = ResolverConfig::builder()
///     .with_cache(CacheConfig::default())
///     .with_batch_size(100)
///     .build();
/// assert_eq!(config.batch_size, 100);
/// ```
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Cache configuration (None = caching disabled).
    pub cache: Option<CacheConfig>,
    /// Maximum identifiers per catalog request.
    pub batch_size: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl ResolverConfig {
    /// Creates a new builder for ResolverConfig.
    pub fn builder() -> ResolverConfigBuilder {
        ResolverConfigBuilder::default()
    }
}

/// Builder for ResolverConfig.
///
/// Unset options fall back to [`ResolverConfig::default`]: no cache and
/// [`DEFAULT_BATCH_SIZE`] identifiers per request.
#[derive(Debug, Clone, Default)]
pub struct ResolverConfigBuilder {
    cache: Option<CacheConfig>,
    batch_size: Option<usize>,
}

impl ResolverConfigBuilder {
    /// Enables caching with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `cache` - Capacity and TTL of the identifier cache.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the maximum identifiers per catalog request.
    ///
    /// # Arguments
    ///
    /// * `batch_size` - Identifiers per request; zero is raised to one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size.max(1));
        self
    }

    /// Builds the ResolverConfig.
    pub fn build(self) -> ResolverConfig {
        ResolverConfig {
            cache: self.cache,
            batch_size: self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
        }
    }
}

/// Configuration for the identifier cache.
///
/// # Example
///
/// ```rust
/// use gooddata_resolver::CacheConfig;
/// use std::time::Duration;
///
/// let cache = CacheConfig {
///     max_entries: 1_000,
///     ttl: Duration::from_secs(60),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached identifiers.
    pub max_entries: usize,
    /// Time-to-live for cached entries.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl: Duration::from_secs(300),
        }
    }
}
