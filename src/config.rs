//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use chrono::Duration;

use crate::cache::{TtlPolicy, DEFAULT_UTC_OFFSET_HOURS};

/// Public FTCScout GraphQL endpoint
pub const DEFAULT_API_URL: &str = "https://api.ftcscout.org/graphql";

/// Longest configurable cache lifetime (30 days)
const MAX_TTL_SECS: u64 = 30 * 24 * 3600;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Upstream GraphQL endpoint
    pub api_url: String,
    /// Optional bearer token for the upstream API
    pub api_token: Option<String>,
    /// Team whose results are displayed
    pub team_number: u32,
    /// Competition season (first calendar year of the season)
    pub season: i32,
    /// Upstream request timeout in seconds
    pub request_timeout_secs: u64,
    /// Reference timezone for the cache TTL policy, hours from UTC
    pub utc_offset_hours: i32,
    /// Cache lifetime on Saturdays, in seconds
    pub ttl_competition_secs: u64,
    /// Cache lifetime on Fridays and Sundays, in seconds
    pub ttl_shoulder_secs: u64,
    /// Cache lifetime on other days, in seconds
    pub ttl_quiet_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `FTCSCOUT_API_URL` - Upstream GraphQL endpoint (default: FTCScout)
    /// - `FTC_API_TOKEN` - Bearer token, sent only when set and non-empty
    /// - `FTC_TEAM_NUMBER` - Team number (default: 24358)
    /// - `FTC_SEASON` - Season year (default: 2025)
    /// - `REQUEST_TIMEOUT_SECS` - Upstream timeout (default: 10)
    /// - `CACHE_UTC_OFFSET_HOURS` - TTL reference timezone (default: -6)
    /// - `CACHE_TTL_SATURDAY_SECS` - Saturday lifetime (default: 300)
    /// - `CACHE_TTL_SHOULDER_SECS` - Friday/Sunday lifetime (default: 1800)
    /// - `CACHE_TTL_QUIET_SECS` - Monday-Thursday lifetime (default: 86400)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            api_url: env::var("FTCSCOUT_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.api_url),
            api_token: env::var("FTC_API_TOKEN")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            team_number: parse_var("FTC_TEAM_NUMBER").unwrap_or(defaults.team_number),
            season: parse_var("FTC_SEASON").unwrap_or(defaults.season),
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout_secs),
            utc_offset_hours: parse_var("CACHE_UTC_OFFSET_HOURS")
                .unwrap_or(defaults.utc_offset_hours),
            ttl_competition_secs: parse_var("CACHE_TTL_SATURDAY_SECS")
                .unwrap_or(defaults.ttl_competition_secs),
            ttl_shoulder_secs: parse_var("CACHE_TTL_SHOULDER_SECS")
                .unwrap_or(defaults.ttl_shoulder_secs),
            ttl_quiet_secs: parse_var("CACHE_TTL_QUIET_SECS").unwrap_or(defaults.ttl_quiet_secs),
        }
    }

    /// Cache lifetime policy built from the configured offset and durations.
    ///
    /// Durations are capped at 30 days; the policy raises zero to one second.
    pub fn ttl_policy(&self) -> TtlPolicy {
        let secs = |value: u64| Duration::seconds(value.min(MAX_TTL_SECS) as i64);

        TtlPolicy::with_utc_offset_hours(self.utc_offset_hours).with_durations(
            secs(self.ttl_competition_secs),
            secs(self.ttl_shoulder_secs),
            secs(self.ttl_quiet_secs),
        )
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            team_number: 24358,
            season: 2025,
            request_timeout_secs: 10,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            ttl_competition_secs: 300,
            ttl_shoulder_secs: 1800,
            ttl_quiet_secs: 86_400,
        }
    }
}
