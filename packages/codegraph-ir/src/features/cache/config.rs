//! Per-tier cache configuration.

use std::path::PathBuf;
use std::time::Duration;

/// L0 session cache configuration.
#[derive(Debug, Clone)]
pub struct SessionCacheConfig {
    pub max_entries: usize,
    pub enable_bloom_filter: bool,
    pub bloom_capacity: usize,
    pub bloom_fp_rate: f64,
}

impl Default for SessionCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            enable_bloom_filter: true,
            bloom_capacity: 100_000,
            bloom_fp_rate: 0.01,
        }
    }
}

/// L1 adaptive (ARC + TTL) cache configuration.
#[derive(Debug, Clone)]
pub struct AdaptiveCacheConfig {
    pub max_entries: u64,
    pub max_bytes: u64,
    pub ttl: Duration,
    pub enable_eviction_listener: bool,
}

impl Default for AdaptiveCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 50_000,
            max_bytes: 256 * 1024 * 1024,
            ttl: Duration::from_secs(3600),
            enable_eviction_listener: false,
        }
    }
}

/// L2 disk cache configuration.
#[derive(Debug, Clone)]
pub struct DiskCacheConfig {
    pub cache_dir: PathBuf,
    pub enable_compression: bool,
    pub enable_rocksdb: bool,
}

impl Default for DiskCacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(".codegraph_cache"),
            enable_compression: true,
            enable_rocksdb: false,
        }
    }
}

/// Top-level L0 + L1 + L2 facade configuration.
#[derive(Debug, Clone)]
pub struct TieredCacheConfig {
    pub l0: SessionCacheConfig,
    pub l1: AdaptiveCacheConfig,
    pub l2: DiskCacheConfig,
    pub enable_background_l2_writes: bool,
}

impl Default for TieredCacheConfig {
    fn default() -> Self {
        Self {
            l0: SessionCacheConfig::default(),
            l1: AdaptiveCacheConfig::default(),
            l2: DiskCacheConfig::default(),
            enable_background_l2_writes: true,
        }
    }
}
