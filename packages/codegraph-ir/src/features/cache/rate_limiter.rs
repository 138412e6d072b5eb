//! Token-bucket rate limiter (C11): bounds concurrent calls to external
//! adapters (embedding/LLM), with independent global, per-tenant, and
//! per-model sub-buckets.

use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::time::sleep;

struct TokenBucketState {
    capacity: f64,
    tokens: f64,
    tokens_per_second: f64,
    last_refill: Instant,
}

impl TokenBucketState {
    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.tokens_per_second).min(self.capacity);
        self.last_refill = now;
    }
}

/// A single token bucket: holds up to `capacity` tokens, refilling at
/// `tokens_per_second`.
pub struct TokenBucket {
    state: Mutex<TokenBucketState>,
}

impl TokenBucket {
    pub fn new(capacity: u32, tokens_per_second: f64) -> Self {
        Self {
            state: Mutex::new(TokenBucketState {
                capacity: capacity as f64,
                tokens: capacity as f64,
                tokens_per_second,
                last_refill: Instant::now(),
            }),
        }
    }

    pub fn per_minute(capacity: u32) -> Self {
        Self::new(capacity, capacity as f64 / 60.0)
    }

    /// Waits until `tokens` are available, then consumes them.
    pub async fn acquire(&self, tokens: u32) {
        loop {
            let wait = {
                let mut state = self.state.lock().unwrap();
                state.refill();
                if state.tokens >= tokens as f64 {
                    state.tokens -= tokens as f64;
                    None
                } else {
                    let needed = tokens as f64 - state.tokens;
                    Some(Duration::from_secs_f64(needed / state.tokens_per_second))
                }
            };
            match wait {
                None => return,
                Some(d) => sleep(d).await,
            }
        }
    }

    /// Non-blocking variant: consumes `tokens` if available, else refuses.
    pub fn try_acquire(&self, tokens: u32) -> bool {
        let mut state = self.state.lock().unwrap();
        state.refill();
        if state.tokens >= tokens as f64 {
            state.tokens -= tokens as f64;
            true
        } else {
            false
        }
    }

    fn refund(&self, tokens: u32) {
        let mut state = self.state.lock().unwrap();
        state.tokens = (state.tokens + tokens as f64).min(state.capacity);
    }

    pub fn tokens_available(&self) -> f64 {
        let mut state = self.state.lock().unwrap();
        state.refill();
        state.tokens
    }

    pub fn capacity(&self) -> f64 {
        self.state.lock().unwrap().capacity
    }
}

/// Bounds outbound calls along three independent dimensions: a global
/// concurrency + token limit, a per-tenant token limit, and an optional
/// per-model token limit.
pub struct RateLimiter {
    global_bucket: TokenBucket,
    global_semaphore: Semaphore,
    tenant_tokens_per_minute: u32,
    tenant_buckets: DashMap<String, Arc<TokenBucket>>,
    model_buckets: HashMap<String, TokenBucket>,
}

impl RateLimiter {
    pub fn new(
        global_tokens_per_minute: u32,
        global_max_concurrent: usize,
        tenant_tokens_per_minute: u32,
        model_tokens_per_minute: HashMap<String, u32>,
    ) -> Self {
        let model_buckets = model_tokens_per_minute
            .into_iter()
            .map(|(model, limit)| (model, TokenBucket::per_minute(limit)))
            .collect();

        Self {
            global_bucket: TokenBucket::per_minute(global_tokens_per_minute),
            global_semaphore: Semaphore::new(global_max_concurrent),
            tenant_tokens_per_minute,
            tenant_buckets: DashMap::new(),
            model_buckets,
        }
    }

    fn tenant_bucket(&self, tenant_id: &str) -> Arc<TokenBucket> {
        self.tenant_buckets
            .entry(tenant_id.to_string())
            .or_insert_with(|| Arc::new(TokenBucket::per_minute(self.tenant_tokens_per_minute)))
            .clone()
    }

    /// Acquires global concurrency, then global/tenant/model token budgets
    /// in order, waiting as needed.
    pub async fn acquire(&self, tokens: u32, tenant_id: Option<&str>, model: Option<&str>) {
        let _permit = self.global_semaphore.acquire().await.expect("semaphore not closed");

        self.global_bucket.acquire(tokens).await;

        if let Some(tenant_id) = tenant_id {
            self.tenant_bucket(tenant_id).acquire(tokens).await;
        }

        if let Some(model) = model {
            if let Some(bucket) = self.model_buckets.get(model) {
                bucket.acquire(tokens).await;
            }
        }
    }

    /// Non-blocking variant; refunds any already-consumed buckets if a
    /// later check fails, so a rejected request doesn't leak budget.
    pub fn try_acquire(&self, tokens: u32, tenant_id: Option<&str>, model: Option<&str>) -> bool {
        if !self.global_bucket.try_acquire(tokens) {
            return false;
        }

        let tenant_bucket = tenant_id.map(|id| self.tenant_bucket(id));
        if let Some(ref bucket) = tenant_bucket {
            if !bucket.try_acquire(tokens) {
                self.global_bucket.refund(tokens);
                return false;
            }
        }

        if let Some(model) = model {
            if let Some(bucket) = self.model_buckets.get(model) {
                if !bucket.try_acquire(tokens) {
                    self.global_bucket.refund(tokens);
                    if let Some(ref tenant_bucket) = tenant_bucket {
                        tenant_bucket.refund(tokens);
                    }
                    return false;
                }
            }
        }

        true
    }
}
