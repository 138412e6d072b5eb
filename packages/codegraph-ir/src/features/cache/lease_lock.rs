//! Distributed-style lock primitive (C11): `acquire(lease_seconds)` /
//! `release(token)`, where release is authenticated by the acquirer's token
//! so one owner can't release a lease it doesn't hold. In-process only;
//! a cross-process deployment would back this with the same storage
//! adapter `features::storage` uses for snapshot locks.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

struct Lease {
    token: String,
    expires_at: Instant,
}

#[derive(Default)]
pub struct LeaseLock {
    leases: Mutex<HashMap<String, Lease>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireError {
    /// Another, unexpired lease already holds this key.
    Held,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseError {
    /// No lease is held for this key (or it already expired).
    NotHeld,
    /// A lease is held, but not by the token presented.
    TokenMismatch,
}

impl LeaseLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires `key` for `lease_seconds`, returning an opaque token that
    /// must be presented to `release`. Expired leases are reclaimed
    /// transparently; a live lease held by someone else fails.
    pub fn acquire(&self, key: &str, lease_seconds: u64) -> Result<String, AcquireError> {
        let mut leases = self.leases.lock().unwrap();
        let now = Instant::now();

        if let Some(existing) = leases.get(key) {
            if existing.expires_at > now {
                return Err(AcquireError::Held);
            }
        }

        let token = Uuid::new_v4().to_string();
        leases.insert(
            key.to_string(),
            Lease {
                token: token.clone(),
                expires_at: now + Duration::from_secs(lease_seconds),
            },
        );
        Ok(token)
    }

    /// Releases `key` iff `token` matches the current holder's token.
    pub fn release(&self, key: &str, token: &str) -> Result<(), ReleaseError> {
        let mut leases = self.leases.lock().unwrap();
        match leases.get(key) {
            None => Err(ReleaseError::NotHeld),
            Some(lease) if lease.expires_at <= Instant::now() => {
                leases.remove(key);
                Err(ReleaseError::NotHeld)
            }
            Some(lease) if lease.token != token => Err(ReleaseError::TokenMismatch),
            Some(_) => {
                leases.remove(key);
                Ok(())
            }
        }
    }

    pub fn is_held(&self, key: &str) -> bool {
        let leases = self.leases.lock().unwrap();
        leases
            .get(key)
            .map(|l| l.expires_at > Instant::now())
            .unwrap_or(false)
    }
}
