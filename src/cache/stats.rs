//! Cache Statistics Module
//!
//! Tracks cache size accounting and performance counters.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache accounting.
///
/// `element_count` and `size_bytes` are maintained by the store under its
/// write lock, so they always agree with the store's membership.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Current number of cached users
    pub element_count: usize,
    /// Approximate bytes held by cached users
    pub size_bytes: usize,
    /// Number of fetches served from the cache
    pub hits: u64,
    /// Number of fetches that fell through to the provider
    pub misses: u64,
    /// Number of entries removed by the sweeper
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no fetches have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Insert ==
    /// Accounts for a newly inserted entry.
    pub fn record_insert(&mut self, size: usize) {
        self.element_count += 1;
        self.size_bytes += size;
    }

    // == Record Replace ==
    /// Accounts for an entry overwritten in place.
    pub fn record_replace(&mut self, old_size: usize, new_size: usize) {
        self.size_bytes = self.size_bytes - old_size + new_size;
    }

    // == Record Removal ==
    /// Accounts for a removed entry.
    pub fn record_removal(&mut self, size: usize) {
        self.element_count = self.element_count.saturating_sub(1);
        self.size_bytes = self.size_bytes.saturating_sub(size);
    }

    // == Record Eviction ==
    /// Accounts for an entry removed by the sweeper.
    pub fn record_eviction(&mut self, size: usize) {
        self.record_removal(size);
        self.evictions += 1;
    }
}
