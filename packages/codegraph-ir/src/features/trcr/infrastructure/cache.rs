//! Compilation cache keyed on `(file_path, content_hash)`, so re-compiling
//! an unchanged rule file is a lookup instead of a full compile pass.
//! LRU eviction by `last_accessed`, plus TTL-based expiry.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};

use crate::features::trcr::domain::TaintRuleExecutableIR;

fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone)]
struct CacheEntry {
    executables: Vec<TaintRuleExecutableIR>,
    created_at: Instant,
    last_accessed: Instant,
}

#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    pub max_entries: usize,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 256,
            ttl: Duration::from_secs(3600),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CompilationCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Keys on `(file_path, content_hash(content))` — a file whose content is
/// byte-identical to a previous compile reuses that compile's output even
/// if it was touched (mtime changed) in between.
pub struct CompilationCache {
    config: CacheConfig,
    entries: Mutex<HashMap<(String, String), CacheEntry>>,
    stats: Mutex<CompilationCacheStats>,
}

impl CompilationCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
            stats: Mutex::new(CompilationCacheStats::default()),
        }
    }

    pub fn get(&self, file_path: &str, content: &str) -> Option<Vec<TaintRuleExecutableIR>> {
        let key = (file_path.to_string(), content_hash(content));
        let mut entries = self.entries.lock().unwrap();
        let mut stats = self.stats.lock().unwrap();

        match entries.get_mut(&key) {
            Some(entry) if entry.created_at.elapsed() <= self.config.ttl => {
                entry.last_accessed = Instant::now();
                stats.hits += 1;
                Some(entry.executables.clone())
            }
            Some(_) => {
                entries.remove(&key);
                stats.misses += 1;
                None
            }
            None => {
                stats.misses += 1;
                None
            }
        }
    }

    pub fn put(&self, file_path: &str, content: &str, executables: Vec<TaintRuleExecutableIR>) {
        let key = (file_path.to_string(), content_hash(content));
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key,
            CacheEntry {
                executables,
                created_at: now,
                last_accessed: now,
            },
        );
        self.evict_over_capacity(&mut entries);
    }

    fn evict_over_capacity(&self, entries: &mut HashMap<(String, String), CacheEntry>) {
        if entries.len() <= self.config.max_entries {
            return;
        }
        let mut stats = self.stats.lock().unwrap();
        while entries.len() > self.config.max_entries {
            let lru_key = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_accessed)
                .map(|(k, _)| k.clone());
            match lru_key {
                Some(k) => {
                    entries.remove(&k);
                    stats.evictions += 1;
                }
                None => break,
            }
        }
    }

    pub fn invalidate(&self, file_path: &str, content: &str) {
        let key = (file_path.to_string(), content_hash(content));
        self.entries.lock().unwrap().remove(&key);
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn stats(&self) -> CompilationCacheStats {
        *self.stats.lock().unwrap()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CompilationCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
