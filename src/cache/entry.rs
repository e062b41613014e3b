//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with an absolute expiry.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

// == Cache Entry ==
/// A stored payload together with its write time and computed expiry.
///
/// Entries are never edited after construction; a new write replaces the
/// whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Key the entry is stored under
    pub key: String,
    /// The stored payload
    pub data: Value,
    /// When the entry was written
    pub written_at: DateTime<Utc>,
    /// Last instant at which the entry is still fresh
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry written at `now` that lives for `ttl`.
    pub fn new(key: impl Into<String>, data: Value, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            key: key.into(),
            data,
            written_at: now,
            expires_at: now + ttl,
        }
    }

    // == Freshness ==
    /// An entry is fresh up to and including its expiry instant.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now <= self.expires_at
    }

    /// Time since the entry was written.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.written_at
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }
}
