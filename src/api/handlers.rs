//! API Handlers
//!
//! HTTP request handlers for each results endpoint. Missing data is a normal
//! outcome here: rankings and team stats answer 404 with `available: false`,
//! achievements always answer 200.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::cache::{CacheStore, Clock, SystemClock};
use crate::config::Config;
use crate::error::FetchResult;
use crate::fetcher::{Fetcher, FtcScoutClient};
use crate::models::{AchievementsResponse, CacheStatsResponse, HealthResponse, UnavailableResponse};
use crate::service::ResultsService;

/// Cache-Control sent with every results response.
pub const CACHE_CONTROL_VALUE: &str = "public, s-maxage=300, stale-while-revalidate=600";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cached results access; owns the shared cache store
    pub results: Arc<ResultsService>,
}

impl AppState {
    /// Creates a new AppState around a results service.
    pub fn new(results: ResultsService) -> Self {
        Self {
            results: Arc::new(results),
        }
    }

    /// Creates a new AppState from configuration, using the system clock.
    pub fn from_config(config: &Config) -> FetchResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a new AppState from configuration with an explicit clock.
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> FetchResult<Self> {
        let cache = Arc::new(RwLock::new(CacheStore::with_clock(config.ttl_policy(), clock)));

        let client = FtcScoutClient::new(config)?;
        let fetcher = Fetcher::new(client, config.team_number, config.season);

        Ok(Self::new(ResultsService::new(fetcher, cache)))
    }
}

/// JSON response carrying the shared Cache-Control header.
fn cacheable<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CACHE_CONTROL, CACHE_CONTROL_VALUE)], Json(body)).into_response()
}

/// Handler for GET /api/rankings
pub async fn rankings_handler(State(state): State<AppState>) -> Response {
    match state.results.rankings().await {
        Some(snapshot) => cacheable(StatusCode::OK, snapshot),
        None => cacheable(
            StatusCode::NOT_FOUND,
            UnavailableResponse::new("Rankings not available"),
        ),
    }
}

/// Handler for GET /api/team-stats
pub async fn team_stats_handler(State(state): State<AppState>) -> Response {
    match state.results.team_stats().await {
        Some(stats) => cacheable(StatusCode::OK, stats),
        None => cacheable(
            StatusCode::NOT_FOUND,
            UnavailableResponse::new("Team stats not available"),
        ),
    }
}

/// Handler for GET /api/achievements
pub async fn achievements_handler(State(state): State<AppState>) -> Response {
    let achievements = state.results.achievements().await;
    cacheable(StatusCode::OK, AchievementsResponse::from_list(achievements))
}

/// Handler for GET /api/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let cache = state.results.cache().read().await;
    Json(CacheStatsResponse::from(cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
