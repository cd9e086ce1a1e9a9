//! Time-boxed snapshot cache for bootstrap responses
//!
//! Caching is opt-in: only the composed fetchers consult this cache, and a
//! `force_refresh` flag bypasses it. Entries expire after a fixed TTL so a
//! deadline passing is observed within minutes, not sessions.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::LazyLock;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::constants::cache_ttl;
use crate::data_fetcher::models::BootstrapResponse;

/// A bootstrap snapshot stamped with its fetch time
#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    pub data: BootstrapResponse,
    pub cached_at: Instant,
}

impl CachedSnapshot {
    pub fn new(data: BootstrapResponse) -> Self {
        CachedSnapshot {
            data,
            cached_at: Instant::now(),
        }
    }

    /// Checks whether the snapshot has outlived its TTL
    pub fn is_expired(&self) -> bool {
        self.cached_at.elapsed() > Duration::from_secs(cache_ttl::SNAPSHOT_SECONDS)
    }
}

// LRU cache structure for bootstrap snapshots, keyed by API base URL.
// In practice one process talks to one base URL; the small capacity exists
// so tests pointing at several mock servers do not evict each other.
static SNAPSHOT_CACHE: LazyLock<RwLock<LruCache<String, CachedSnapshot>>> =
    LazyLock::new(|| RwLock::new(LruCache::new(NonZeroUsize::new(4).unwrap())));

/// Caches a bootstrap snapshot for the given base URL
#[instrument(skip(key, data), fields(cache_key = %key))]
pub async fn cache_snapshot(key: String, data: BootstrapResponse) {
    debug!(
        "Caching snapshot: key={}, events={}, phases={}",
        key,
        data.events.len(),
        data.phases.len()
    );

    let mut cache = SNAPSHOT_CACHE.write().await;
    cache.put(key.clone(), CachedSnapshot::new(data));

    info!(
        "Snapshot cache entry created: key={}, ttl={}s",
        key,
        cache_ttl::SNAPSHOT_SECONDS
    );
}

/// Retrieves a cached snapshot for the given base URL if it has not expired
#[instrument(skip(key), fields(cache_key = %key))]
pub async fn get_cached_snapshot(key: &str) -> Option<BootstrapResponse> {
    let mut cache = SNAPSHOT_CACHE.write().await;

    if let Some(cached_entry) = cache.get(key) {
        if !cached_entry.is_expired() {
            debug!(
                "Cache hit for snapshot: key={}, age={:?}",
                key,
                cached_entry.cached_at.elapsed()
            );
            return Some(cached_entry.data.clone());
        }

        warn!(
            "Removing expired snapshot cache entry: key={}, age={:?}",
            key,
            cached_entry.cached_at.elapsed()
        );
        cache.pop(key);
    } else {
        debug!("Cache miss for snapshot: key={}", key);
    }

    None
}

/// Empties the snapshot cache. Used by tests and by callers that want a
/// clean slate after changing the configured base URL.
pub async fn clear_snapshot_cache() {
    let mut cache = SNAPSHOT_CACHE.write().await;
    cache.clear();
    debug!("Snapshot cache cleared");
}

/// Current number of cached snapshots
#[allow(dead_code)]
pub async fn get_snapshot_cache_size() -> usize {
    SNAPSHOT_CACHE.read().await.len()
}
