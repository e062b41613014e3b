//! Cache Statistics Module
//!
//! Tracks lookups and describes the current entries for debugging.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache activity and contents.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups answered from a fresh entry
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Per-entry age and remaining lifetime
    pub entries: Vec<EntryStats>,
}

/// Age and lifetime of one cached entry, in seconds.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EntryStats {
    pub key: String,
    pub age_secs: i64,
    pub expires_in_secs: i64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }
}
