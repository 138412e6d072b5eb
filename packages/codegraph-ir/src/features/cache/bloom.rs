//! Bloom filter wrapper for cache existence checks

use probabilistic_collections::bloom::BloomFilter as ProbBloomFilter;
use std::hash::Hash;

/// Bloom filter for O(1) existence checks
///
/// False positive rate: ~0.01 (1%)
/// False negative rate: 0 (impossible)
pub struct BloomFilter<T> {
    filter: ProbBloomFilter<T>,
    capacity: usize,
    false_positive_rate: f64,
}

impl<T: Hash> BloomFilter<T> {
    /// Create new bloom filter
    ///
    /// # Arguments
    /// * `capacity` - Expected number of elements
    /// * `false_positive_rate` - Target FP rate (default: 0.01)
    pub fn new(capacity: usize, false_positive_rate: f64) -> Self {
        let filter = ProbBloomFilter::new(capacity, false_positive_rate);

        Self {
            filter,
            capacity,
            false_positive_rate,
        }
    }

    /// Insert element
    pub fn insert(&mut self, item: &T) {
        self.filter.insert(item);
    }

    /// Check if element might exist (false positives possible)
    pub fn contains(&self, item: &T) -> bool {
        self.filter.contains(item)
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.filter = ProbBloomFilter::new(self.capacity, self.false_positive_rate);
    }

    /// Get capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Hash> Default for BloomFilter<T> {
    fn default() -> Self {
        Self::new(10_000, 0.01)
    }
}
