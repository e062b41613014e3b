//! Remote Data Fetcher
//!
//! Pulls team results from the upstream API and normalizes them. Every
//! failure is logged and converted to an absent or empty result here; no
//! error crosses this boundary.

pub mod client;
pub mod transform;

use chrono::Utc;
use tracing::{info, warn};

use crate::error::FetchResult;
use crate::models::ftcscout::TeamData;
use crate::models::{Achievement, RankingSnapshot, TeamStats};

pub use client::FtcScoutClient;

/// Fetches and normalizes results for one team and season.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: FtcScoutClient,
    team_number: u32,
    season: i32,
}

impl Fetcher {
    pub fn new(client: FtcScoutClient, team_number: u32, season: i32) -> Self {
        Self {
            client,
            team_number,
            season,
        }
    }

    async fn fetch_team(&self) -> FetchResult<TeamData> {
        info!("Fetching team {} results from upstream", self.team_number);
        self.client.fetch_team(self.team_number, self.season).await
    }

    /// Current event rankings, or `None` if unavailable for any reason.
    pub async fn fetch_rankings(&self) -> Option<RankingSnapshot> {
        self.fetch_standings().await.map(|(snapshot, _)| snapshot)
    }

    /// Team headline stats, or `None` if unavailable for any reason.
    pub async fn fetch_team_stats(&self) -> Option<TeamStats> {
        self.fetch_standings().await.map(|(_, stats)| stats)
    }

    /// Rankings and team stats derived from a single upstream call.
    pub async fn fetch_standings(&self) -> Option<(RankingSnapshot, TeamStats)> {
        match self.try_fetch_standings().await {
            Ok(standings) => Some(standings),
            Err(e) => {
                warn!("Rankings unavailable: {}", e);
                None
            }
        }
    }

    /// Award history; an empty list when nothing is available.
    pub async fn fetch_achievements(&self) -> Vec<Achievement> {
        match self.try_fetch_achievements().await {
            Ok(achievements) => achievements,
            Err(e) => {
                warn!("Achievements unavailable: {}", e);
                Vec::new()
            }
        }
    }

    /// Like [`fetch_standings`](Self::fetch_standings) but keeps the failure.
    pub async fn try_fetch_standings(&self) -> FetchResult<(RankingSnapshot, TeamStats)> {
        let team = self.fetch_team().await?;
        let snapshot = transform::build_ranking_snapshot(&team, self.team_number, Utc::now())?;
        let stats = transform::build_team_stats(&team, &snapshot, self.team_number)?;
        Ok((snapshot, stats))
    }

    /// Like [`fetch_achievements`](Self::fetch_achievements) but keeps the
    /// failure, so callers can tell "no awards" from "no answer".
    pub async fn try_fetch_achievements(&self) -> FetchResult<Vec<Achievement>> {
        let team = self.fetch_team().await?;
        Ok(transform::build_achievements(&team.awards))
    }
}
