//! Results Service
//!
//! Fetch-with-cache for each dataset: answer from a fresh cache entry, else
//! fetch, store on success, and return the absent/empty sentinel on failure.
//! Concurrent misses may each fetch; the last write wins.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheStore, ACHIEVEMENTS_KEY, RANKINGS_KEY, TEAM_STATS_KEY};
use crate::fetcher::Fetcher;
use crate::models::{Achievement, RankingSnapshot, TeamStats};

/// Cached access to the team's results.
#[derive(Debug, Clone)]
pub struct ResultsService {
    fetcher: Fetcher,
    cache: Arc<RwLock<CacheStore>>,
}

impl ResultsService {
    pub fn new(fetcher: Fetcher, cache: Arc<RwLock<CacheStore>>) -> Self {
        Self { fetcher, cache }
    }

    /// Shared handle to the underlying store.
    pub fn cache(&self) -> &Arc<RwLock<CacheStore>> {
        &self.cache
    }

    /// Current event rankings.
    pub async fn rankings(&self) -> Option<RankingSnapshot> {
        if let Some(snapshot) = self.cached::<RankingSnapshot>(RANKINGS_KEY).await {
            if !snapshot.rankings.is_empty() {
                return Some(snapshot);
            }
        }

        self.refresh_standings().await.map(|(snapshot, _)| snapshot)
    }

    /// Operating team's headline stats.
    pub async fn team_stats(&self) -> Option<TeamStats> {
        if let Some(stats) = self.cached::<TeamStats>(TEAM_STATS_KEY).await {
            return Some(stats);
        }

        self.refresh_standings().await.map(|(_, stats)| stats)
    }

    /// Award history, possibly empty.
    pub async fn achievements(&self) -> Vec<Achievement> {
        if let Some(achievements) = self.cached::<Vec<Achievement>>(ACHIEVEMENTS_KEY).await {
            return achievements;
        }

        match self.fetcher.try_fetch_achievements().await {
            Ok(achievements) => {
                self.cache.write().await.put(ACHIEVEMENTS_KEY, &achievements);
                achievements
            }
            Err(e) => {
                warn!("Achievements unavailable: {}", e);
                Vec::new()
            }
        }
    }

    async fn cached<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        // Write lock: an expired entry is evicted on read
        let value = self.cache.write().await.get::<T>(key);
        if value.is_some() {
            debug!("Serving '{}' from cache", key);
        }
        value
    }

    /// One upstream call refreshes both rankings and team stats.
    async fn refresh_standings(&self) -> Option<(RankingSnapshot, TeamStats)> {
        let (snapshot, stats) = self.fetcher.fetch_standings().await?;

        let mut cache = self.cache.write().await;
        cache.put(RANKINGS_KEY, &snapshot);
        cache.put(TEAM_STATS_KEY, &stats);

        Some((snapshot, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use chrono::Utc;
    use serde_json::{json, Value};

    use crate::cache::TtlPolicy;
    use crate::config::Config;
    use crate::fetcher::FtcScoutClient;

    /// Upstream stub answering every query with `body` and counting calls.
    async fn spawn_upstream(status: StatusCode, body: Value) -> (String, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let app = Router::new()
            .route(
                "/graphql",
                post(move |State(calls): State<Arc<AtomicUsize>>| {
                    let body = body.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        (status, Json(body))
                    }
                }),
            )
            .with_state(counter);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/graphql", addr), calls)
    }

    fn service_for(url: &str) -> ResultsService {
        let config = Config {
            api_url: url.to_string(),
            request_timeout_secs: 5,
            ..Config::default()
        };
        let fetcher = Fetcher::new(FtcScoutClient::new(&config).unwrap(), 24358, 2025);
        let cache = Arc::new(RwLock::new(CacheStore::new(TtlPolicy::default())));
        ResultsService::new(fetcher, cache)
    }

    fn ranked(number: u32, rank: u32) -> Value {
        json!({
            "teamNumber": number,
            "team": {"name": format!("Team {}", number)},
            "stats": {
                "rank": rank, "wins": 2, "losses": 1, "ties": 0, "qualMatchesPlayed": 3,
                "avg": {"autoPoints": 20.0, "dcPoints": 40.0, "egPoints": 5.0, "totalPoints": 65.0}
            }
        })
    }

    fn league_payload(awards: Value) -> Value {
        json!({
            "data": {
                "teamByNumber": {
                    "number": 24358,
                    "name": "Ragnarok",
                    "awards": awards,
                    "events": [{
                        "event": {
                            "code": "USIAACPS1",
                            "name": "Acropolis League Meet 1",
                            "start": "2025-11-15",
                            "ongoing": true,
                            "started": true,
                            "teams": [ranked(11111, 1), ranked(24358, 2)]
                        },
                        "stats": null
                    }],
                    "matches": []
                }
            }
        })
    }

    fn empty_snapshot() -> RankingSnapshot {
        RankingSnapshot {
            event_name: "Acropolis League Meet 1".to_string(),
            start_date: "2025-11-15".to_string(),
            venue: String::new(),
            rank: 0,
            total_teams: 0,
            wins: 0,
            losses: 0,
            ties: 0,
            rankings: vec![],
            last_updated: Utc::now(),
            current_event: None,
            recent_matches: vec![],
        }
    }

    #[tokio::test]
    async fn test_empty_cached_rankings_are_refetched() {
        let (url, calls) = spawn_upstream(StatusCode::OK, league_payload(json!([]))).await;
        let service = service_for(&url);
        service.cache().write().await.put(RANKINGS_KEY, &empty_snapshot());

        let snapshot = service.rankings().await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(snapshot.rankings.len(), 2);
        assert_eq!(snapshot.rank, 2);

        let cached = service.cache().write().await.get::<RankingSnapshot>(RANKINGS_KEY);
        assert_eq!(cached.unwrap().rankings.len(), 2);
    }

    #[tokio::test]
    async fn test_cached_rankings_skip_upstream() {
        let (url, calls) = spawn_upstream(StatusCode::OK, league_payload(json!([]))).await;
        let service = service_for(&url);

        assert!(service.rankings().await.is_some());
        assert!(service.rankings().await.is_some());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_team_stats_miss_fills_both_keys() {
        let (url, calls) = spawn_upstream(StatusCode::OK, league_payload(json!([]))).await;
        let service = service_for(&url);

        let stats = service.team_stats().await.unwrap();
        assert_eq!(stats.rank, 2);

        let snapshot = service.rankings().await.unwrap();
        assert_eq!(snapshot.total_teams, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_achievements_are_cached() {
        let (url, calls) = spawn_upstream(StatusCode::OK, league_payload(json!([]))).await;
        let service = service_for(&url);

        assert!(service.achievements().await.is_empty());
        assert!(service.achievements().await.is_empty());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let (url, calls) = spawn_upstream(StatusCode::INTERNAL_SERVER_ERROR, json!({})).await;
        let service = service_for(&url);

        assert!(service.rankings().await.is_none());
        assert!(service.achievements().await.is_empty());
        assert!(service.rankings().await.is_none());

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(service.cache().read().await.is_empty());
    }
}
