//! Cache Store Module
//!
//! Key/value store whose entries expire according to the day-of-week TTL
//! policy. Lookups check expiry lazily; there is no eviction policy and no
//! background sweeper.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats, Clock, EntryStats, SystemClock, TtlPolicy};

// == Cache Store ==
/// In-memory cache keyed by dataset name.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Hit/miss counters
    stats: CacheStats,
    /// Lifetime policy applied on every write
    policy: TtlPolicy,
    /// Time source for expiry and TTL selection
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store driven by the system clock.
    pub fn new(policy: TtlPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    /// Creates an empty store driven by the given clock.
    pub fn with_clock(policy: TtlPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            policy,
            clock,
        }
    }

    // == Get ==
    /// Returns the raw payload under `key` if it is still fresh.
    ///
    /// An expired entry is removed and reported as absent.
    pub fn get_value(&mut self, key: &str) -> Option<Value> {
        let now = self.clock.now();

        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(now) => {
                self.stats.record_hit();
                Some(entry.data.clone())
            }
            Some(_) => {
                debug!("Cache entry '{}' expired", key);
                self.entries.remove(key);
                self.stats.record_miss();
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Returns the payload under `key` decoded as `T` if it is still fresh.
    ///
    /// A payload that does not decode as `T` is treated as absent.
    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let value = self.get_value(key)?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("Cache entry '{}' has unexpected shape: {}", key, e);
                None
            }
        }
    }

    // == Put ==
    /// Stores a raw payload, replacing any previous entry for `key`.
    pub fn put_value(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        let now = self.clock.now();
        let ttl = self.policy.ttl_at(now);

        debug!("Caching '{}' for {}s", key, ttl.num_seconds());
        let entry = CacheEntry::new(key.clone(), value, now, ttl);
        self.entries.insert(key, entry);
    }

    /// Serializes and stores `value` under `key`.
    ///
    /// A value that cannot be represented as JSON is logged and not stored.
    pub fn put<T: Serialize>(&mut self, key: impl Into<String>, value: &T) {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(json) => self.put_value(key, json),
            Err(e) => warn!("Not caching '{}': {}", key, e),
        }
    }

    // == Clear ==
    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Stats ==
    /// Returns counters plus the age and remaining lifetime of each entry.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let mut stats = self.stats.clone();

        let mut entries: Vec<EntryStats> = self
            .entries
            .values()
            .map(|entry| EntryStats {
                key: entry.key.clone(),
                age_secs: entry.age(now).num_seconds(),
                expires_in_secs: entry.remaining(now).num_seconds(),
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        stats.total_entries = self.entries.len();
        stats.entries = entries;
        stats
    }

    /// The policy used to compute lifetimes.
    pub fn policy(&self) -> &TtlPolicy {
        &self.policy
    }

    // == Length ==
    /// Returns the number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
