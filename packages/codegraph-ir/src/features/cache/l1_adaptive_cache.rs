//! L1 Adaptive Cache: ARC eviction with TTL

use crate::features::cache::{
    config::AdaptiveCacheConfig, metrics::AdaptiveCacheMetrics, CacheKey, CacheResult,
};
use moka::future::Cache;
use prometheus::Registry;
use std::sync::Arc;

/// Trait for estimating object size
pub trait EstimateSize {
    fn estimated_size_bytes(&self) -> usize;
}

/// L1 Adaptive Cache with ARC eviction
///
/// Features:
/// - ARC (Adaptive Replacement Cache): Self-tuning LRU+LFU hybrid
/// - TTL: Automatic expiration after 1 hour
/// - Size-based eviction: Weighted by estimated_size_bytes()
///
/// Performance: ~10μs per lookup
pub struct AdaptiveCache<T: EstimateSize + Send + Sync + 'static> {
    /// moka cache (ARC + TTL)
    cache: Cache<CacheKey, Arc<T>>,

    /// Configuration
    config: AdaptiveCacheConfig,

    /// Metrics
    metrics: Arc<AdaptiveCacheMetrics>,
}

impl<T: EstimateSize + Send + Sync + 'static> AdaptiveCache<T> {
    /// Create new adaptive cache
    pub fn new(config: AdaptiveCacheConfig, registry: &Registry) -> Self {
        let cache = Cache::builder()
            // Max capacity (number of entries)
            .max_capacity(config.max_entries)
            // Weigher: size in MB
            .weigher(|_key: &CacheKey, value: &Arc<T>| {
                let bytes = value.estimated_size_bytes();
                let mb = (bytes / (1024 * 1024)).max(1) as u32;
                mb
            })
            // Time to live
            .time_to_live(config.ttl)
            // Eviction listener (optional)
            .eviction_listener(move |key, _value, cause| {
                if config.enable_eviction_listener {
                    tracing::debug!("L1 evicted: {} (cause: {:?})", key.file_id.path, cause);
                }
            })
            .build();

        Self {
            cache,
            config,
            metrics: Arc::new(AdaptiveCacheMetrics::new(registry)),
        }
    }

    /// Get cached value
    pub async fn get(&self, key: &CacheKey) -> Option<Arc<T>> {
        let result = self.cache.get(key).await;

        if result.is_some() {
            self.metrics.hits.inc();
        } else {
            self.metrics.misses.inc();
        }

        self.metrics.entries.set(self.cache.entry_count() as i64);
        self.metrics
            .bytes
            .set(self.cache.weighted_size() as i64 * 1024 * 1024);

        result
    }

    /// Insert value
    pub async fn insert(&self, key: CacheKey, value: Arc<T>) {
        self.cache.insert(key, value).await;

        self.metrics.entries.set(self.cache.entry_count() as i64);
        self.metrics
            .bytes
            .set(self.cache.weighted_size() as i64 * 1024 * 1024);
    }

    /// Invalidate a single entry
    pub async fn invalidate(&self, key: &CacheKey) {
        self.cache.invalidate(key).await;
        self.metrics.entries.set(self.cache.entry_count() as i64);
        self.metrics
            .bytes
            .set(self.cache.weighted_size() as i64 * 1024 * 1024);
    }

    /// Clear all entries
    pub async fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;

        self.metrics.entries.set(0);
        self.metrics.bytes.set(0);
    }

    /// Get entry count
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Get weighted size (in MB)
    pub fn weighted_size_mb(&self) -> u64 {
        self.cache.weighted_size()
    }

    /// Get hit rate
    pub fn hit_rate(&self) -> f64 {
        self.metrics.hit_rate()
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<AdaptiveCacheMetrics> {
        Arc::clone(&self.metrics)
    }
}
