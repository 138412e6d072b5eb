//! Priority-weighted in-memory cache (C11): entries are scored by
//! `access_count * freshness / size`, and eviction removes the minimum-score
//! entry. Complements `AdaptiveCache` (moka/ARC) with an explicit,
//! inspectable scoring policy for callers that need a non-count cap and a
//! byte cap simultaneously.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// How long it takes a fresh entry's recency contribution to halve.
const FRESHNESS_HALF_LIFE: Duration = Duration::from_secs(300);

pub struct CacheEntry<V> {
    pub value: V,
    pub size_bytes: usize,
    pub access_count: u64,
    pub last_access: Instant,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V, size_bytes: usize) -> Self {
        Self {
            value,
            size_bytes,
            access_count: 1,
            last_access: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.access_count += 1;
        self.last_access = Instant::now();
    }

    /// `access_count * freshness / size`. Freshness decays exponentially
    /// with time since last access (half-life `FRESHNESS_HALF_LIFE`), so a
    /// score is always positive, higher for frequently accessed entries,
    /// lower for larger entries, and decays for stale ones.
    pub fn priority_score(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.last_access).as_secs_f64();
        let half_life = FRESHNESS_HALF_LIFE.as_secs_f64();
        let freshness = 0.5_f64.powf(elapsed / half_life);
        let size = self.size_bytes.max(1) as f64;
        (self.access_count as f64) * freshness / size
    }
}

#[derive(Debug, Clone, Default)]
pub struct PriorityCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub priority_evictions: u64,
    pub current_bytes: usize,
}

struct Inner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    stats: PriorityCacheStats,
}

/// Priority-scored memory cache with both an entry-count cap and a byte cap.
/// `max_size == 0` makes every `set` a no-op (cache disabled).
pub struct PriorityMemoryCache<V> {
    max_size: usize,
    max_bytes: usize,
    inner: Mutex<Inner<V>>,
}

impl<V: Clone> PriorityMemoryCache<V> {
    pub fn new(max_size: usize, max_bytes: usize) -> Self {
        Self {
            max_size,
            max_bytes,
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                stats: PriorityCacheStats::default(),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(entry) = inner.entries.get_mut(key) {
            entry.touch();
            let value = entry.value.clone();
            inner.stats.hits += 1;
            Some(value)
        } else {
            inner.stats.misses += 1;
            None
        }
    }

    pub fn set(&self, key: impl Into<String>, value: V, size_bytes: usize) {
        if self.max_size == 0 {
            return;
        }
        let key = key.into();
        let mut inner = self.inner.lock().unwrap();

        if let Some(existing) = inner.entries.get_mut(&key) {
            existing.value = value;
            existing.size_bytes = size_bytes;
            existing.touch();
        } else {
            inner.entries.insert(key, CacheEntry::new(value, size_bytes));
        }

        self.evict_over_capacity(&mut inner);
        inner.stats.current_bytes = inner.entries.values().map(|e| e.size_bytes).sum();
    }

    fn evict_over_capacity(&self, inner: &mut Inner<V>) {
        loop {
            let over_count = inner.entries.len() > self.max_size;
            let current_bytes: usize = inner.entries.values().map(|e| e.size_bytes).sum();
            let over_bytes = current_bytes > self.max_bytes;
            if !over_count && !over_bytes {
                break;
            }
            let now = Instant::now();
            let victim = inner
                .entries
                .iter()
                .min_by(|a, b| {
                    a.1.priority_score(now)
                        .partial_cmp(&b.1.priority_score(now))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|(k, _)| k.clone());

            match victim {
                Some(k) => {
                    inner.entries.remove(&k);
                    inner.stats.evictions += 1;
                    inner.stats.priority_evictions += 1;
                }
                None => break,
            }
        }
    }

    pub fn delete(&self, key: &str) -> bool {
        self.inner.lock().unwrap().entries.remove(key).is_some()
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.entries.clear();
        inner.stats = PriorityCacheStats::default();
    }

    pub fn stats(&self) -> PriorityCacheStats {
        self.inner.lock().unwrap().stats.clone()
    }

    /// `(key, priority_score, access_count, size_bytes)` for every entry,
    /// for diagnostics and tests.
    pub fn entry_priorities(&self) -> Vec<(String, f64, u64, usize)> {
        let inner = self.inner.lock().unwrap();
        let now = Instant::now();
        inner
            .entries
            .iter()
            .map(|(k, e)| (k.clone(), e.priority_score(now), e.access_count, e.size_bytes))
            .collect()
    }
}
