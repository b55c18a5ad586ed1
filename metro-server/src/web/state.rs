//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::{CacheConfig, PathCache};
use crate::network::Network;
use crate::planner::SearchConfig;

/// Shared application state.
///
/// The network sits behind a lock because compiling a route may register
/// new segments.
#[derive(Clone)]
pub struct AppState {
    /// The transit network
    pub network: Arc<RwLock<Network>>,

    /// Path search configuration
    pub config: Arc<SearchConfig>,

    /// Cached path search results
    pub cache: Arc<PathCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: Network, config: SearchConfig, cache_config: &CacheConfig) -> Self {
        Self {
            network: Arc::new(RwLock::new(network)),
            config: Arc::new(config),
            cache: Arc::new(PathCache::new(cache_config)),
        }
    }
}
