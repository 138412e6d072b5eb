//! Fingerprint utilities with Blake3 SIMD hashing

use crate::features::cache::{CacheError, CacheResult, Fingerprint};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::SystemTime;

impl Fingerprint {
    /// Compute from file path (read + hash)
    pub fn from_file(path: impl AsRef<Path>) -> CacheResult<Self> {
        let mut file = File::open(path.as_ref())?;
        let mut hasher = blake3::Hasher::new();

        // Read file in chunks and update hasher
        let mut buffer = [0u8; 8192];
        loop {
            let n = file.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }

        Ok(Self(hasher.finalize()))
    }

    /// Compute from file with metadata (fast path check first)
    pub fn from_file_with_metadata(path: impl AsRef<Path>) -> CacheResult<(Self, u64, u64)> {
        let path = path.as_ref();
        let metadata = path.metadata()?;

        // Extract mtime (nanoseconds)
        let mtime_ns = metadata
            .modified()?
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|e| CacheError::Other(format!("Invalid mtime: {}", e)))?
            .as_nanos() as u64;

        let size_bytes = metadata.len();

        // Compute content hash
        let mut file = File::open(path)?;
        let mut hasher = blake3::Hasher::new();

        // Read file in chunks and update hasher
        let mut buffer = [0u8; 8192];
        loop {
            let n = file.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }

        Ok((Self(hasher.finalize()), mtime_ns, size_bytes))
    }

    /// Check if two fingerprints match
    pub fn matches(&self, other: &Fingerprint) -> bool {
        self.0 == other.0
    }
}
