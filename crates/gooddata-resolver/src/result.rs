//! Resolution result types.

use std::time::Duration;

/// A rewritten value together with the statistics of its resolution.
///
/// # Example
///
/// ```ignore
/// let resolved = resolver.resolve_afm(afm)?;
///
/// println!(
///     "{} identifiers, {} from cache",
///     resolved.stats.requested, resolved.stats.cache_hits
/// );
/// let afm = resolved.into_inner();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    /// The value with every identifier qualifier replaced by its URI.
    pub value: T,
    /// Resolution statistics.
    pub stats: ResolutionStats,
}

impl<T> Resolved<T> {
    /// Wraps a resolved value.
    pub fn new(value: T, stats: ResolutionStats) -> Self {
        Self { value, stats }
    }

    /// Discards the statistics.
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Statistics from one resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    /// Distinct identifiers that needed a URI.
    pub requested: usize,
    /// Identifiers answered by the cache.
    pub cache_hits: usize,
    /// Requests sent to the catalog.
    pub catalog_lookups: usize,
    /// Total resolution duration.
    pub duration: Duration,
}

impl ResolutionStats {
    /// Identifiers that had to be fetched from the catalog.
    pub fn cache_misses(&self) -> usize {
        self.requested - self.cache_hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_into_inner() {
        let resolved = Resolved::new(42, ResolutionStats::default());
        assert_eq!(resolved.into_inner(), 42);
    }

    #[test]
    fn test_cache_misses() {
        let stats = ResolutionStats {
            requested: 5,
            cache_hits: 3,
            catalog_lookups: 1,
            duration: Duration::from_millis(2),
        };
        assert_eq!(stats.cache_misses(), 2);
    }
}
