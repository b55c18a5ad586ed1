//! Caching layer for path queries.
//!
//! Path search rebuilds the graph for every query. Results only change when
//! the segment catalog grows, so each key carries the catalog size it was
//! computed against. Entries from an older catalog can never be hit, and
//! [`PathCache::invalidate_all`] drops them to free the space.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{LineId, StationName};
use crate::planner::{PathResult, SearchStrategy};

/// Cache key for a path query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathKey {
    pub start: StationName,
    pub end: StationName,
    pub limit: usize,
    pub strategy: SearchStrategy,
    /// Lines the graph was restricted to, sorted and deduplicated.
    /// `None` means every segment.
    pub lines: Option<Vec<LineId>>,
    /// Catalog size when the result was computed.
    pub generation: usize,
}

impl PathKey {
    /// Create a key. The line list is normalised so that the same set in a
    /// different order hits the same entry.
    pub fn new(
        start: StationName,
        end: StationName,
        limit: usize,
        strategy: SearchStrategy,
        lines: Option<Vec<LineId>>,
        generation: usize,
    ) -> Self {
        let lines = lines.map(|mut lines| {
            lines.sort();
            lines.dedup();
            lines
        });
        Self {
            start,
            end,
            limit,
            strategy,
            lines,
            generation,
        }
    }
}

/// Cached search result.
type PathEntry = Arc<Vec<PathResult>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Cache for path search results.
pub struct PathCache {
    paths: MokaCache<PathKey, PathEntry>,
}

impl PathCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let paths = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { paths }
    }

    /// Get a cached result.
    pub async fn get(&self, key: &PathKey) -> Option<PathEntry> {
        self.paths.get(key).await
    }

    /// Insert a result into the cache.
    pub async fn insert(&self, key: PathKey, entry: PathEntry) {
        self.paths.insert(key, entry).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.paths.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.paths.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> StationName {
        StationName::parse(s).unwrap()
    }

    fn line(s: &str) -> LineId {
        LineId::parse(s).unwrap()
    }

    fn key(lines: Option<Vec<LineId>>) -> PathKey {
        PathKey::new(name("A"), name("B"), 3, SearchStrategy::Ranked, lines, 4)
    }

    fn entry() -> PathEntry {
        Arc::new(vec![PathResult {
            path: vec![name("A"), name("B")],
            length: 3.0,
        }])
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_capacity, 1000);
    }

    #[test]
    fn line_order_does_not_matter() {
        let a = key(Some(vec![line("L2"), line("L1"), line("L2")]));
        let b = key(Some(vec![line("L1"), line("L2")]));
        assert_eq!(a, b);
        assert_ne!(a, key(None));
    }

    #[tokio::test]
    async fn insert_and_get() {
        let cache = PathCache::new(&CacheConfig::default());
        assert!(cache.get(&key(None)).await.is_none());

        cache.insert(key(None), entry()).await;
        let cached = cache.get(&key(None)).await.unwrap();
        assert_eq!(cached[0].length, 3.0);
        assert!(cache.get(&key(Some(vec![line("L1")]))).await.is_none());
    }

    #[tokio::test]
    async fn older_generation_is_a_miss() {
        let cache = PathCache::new(&CacheConfig::default());
        cache.insert(key(None), entry()).await;

        let mut grown = key(None);
        grown.generation += 1;
        assert!(cache.get(&grown).await.is_none());
    }

    #[tokio::test]
    async fn invalidate_drops_entries() {
        let cache = PathCache::new(&CacheConfig::default());
        cache.insert(key(None), entry()).await;

        cache.invalidate_all();
        assert!(cache.get(&key(None)).await.is_none());
    }
}
