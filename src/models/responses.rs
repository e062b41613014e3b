//! Response DTOs for the results API
//!
//! Defines the structure of outgoing HTTP response bodies other than the
//! display models themselves.

use serde::Serialize;

use crate::cache::{CacheStats, EntryStats};

use super::results::Achievement;

/// Body returned when a dataset has no data to show.
///
/// The site renders a "coming soon" placeholder for these.
#[derive(Debug, Clone, Serialize)]
pub struct UnavailableResponse {
    pub error: String,
    pub available: bool,
}

impl UnavailableResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            available: false,
        }
    }
}

/// Body for GET /api/achievements.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementsResponse {
    pub achievements: Vec<Achievement>,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AchievementsResponse {
    /// Wraps a list; an empty list is reported as unavailable.
    pub fn from_list(achievements: Vec<Achievement>) -> Self {
        if achievements.is_empty() {
            Self {
                achievements,
                available: false,
                error: Some("Achievements not available".to_string()),
            }
        } else {
            Self {
                achievements,
                available: true,
                error: None,
            }
        }
    }
}

/// Response body for the cache stats endpoint (GET /api/cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub total_entries: usize,
    pub hit_rate: f64,
    pub entries: Vec<EntryStats>,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            total_entries: stats.total_entries,
            entries: stats.entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Body for unexpected server failures.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub available: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            available: false,
            message: message.into(),
        }
    }
}
