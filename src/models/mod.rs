//! Data models for the results service
//!
//! `ftcscout` holds the upstream wire types, `results` the normalized display
//! types, and `responses` the remaining HTTP bodies.

pub mod ftcscout;
pub mod responses;
pub mod results;

// Re-export commonly used types
pub use responses::{
    AchievementsResponse, CacheStatsResponse, ErrorResponse, HealthResponse, UnavailableResponse,
};
pub use results::{
    Achievement, EventSummary, MatchOutcome, MatchSummary, QuickStatRanks, RankingRow,
    RankingSnapshot, Record, TeamStats, TrophyTier,
};
