//! Cache Statistics Module
//!
//! Tracks cache activity: hits, misses, inserts, updates, evictions and removals.
//! Diagnostic only; nothing here feeds back into eviction policy.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache activity counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of `get` calls that found their key
    pub hits: u64,
    /// Number of `get` calls that did not
    pub misses: u64,
    /// Number of `set` calls that created an entry
    pub inserts: u64,
    /// Number of `set` calls that replaced an existing value
    pub updates: u64,
    /// Number of entries evicted due to LRU policy
    pub evictions: u64,
    /// Number of entries removed explicitly
    pub removals: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Fixed capacity of the cache
    pub capacity: usize,
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
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Activity ==
    /// Total number of counted operations.
    pub fn operations(&self) -> u64 {
        self.hits + self.misses + self.inserts + self.updates + self.removals
    }

    // == Recorders ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_removal(&mut self) {
        self.removals += 1;
    }
}
