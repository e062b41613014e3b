//! Cache Module
//!
//! Provides in-memory caching with day-of-week sensitive TTL expiration.

mod clock;
mod entry;
mod stats;
mod store;
mod ttl;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::{CacheStats, EntryStats};
pub use store::CacheStore;
pub use ttl::{TtlBucket, TtlPolicy, DEFAULT_UTC_OFFSET_HOURS};

// == Cache Keys ==
/// Key for the league ranking snapshot
pub const RANKINGS_KEY: &str = "rankings";

/// Key for the operating team's statistics
pub const TEAM_STATS_KEY: &str = "team-stats";

/// Key for the award history
pub const ACHIEVEMENTS_KEY: &str = "achievements";
