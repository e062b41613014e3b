//! Display models
//!
//! Normalized, immutable shapes served to the website. Field names are
//! camelCase on the wire to match what the front end already consumes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ftcscout::Alliance;

// == Rankings ==
/// Standing of every team at the current event, plus the operating team's
/// own position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSnapshot {
    pub event_name: String,
    pub start_date: String,
    pub venue: String,
    pub rank: u32,
    pub total_teams: usize,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub rankings: Vec<RankingRow>,
    pub last_updated: DateTime<Utc>,
    pub current_event: Option<EventSummary>,
    #[serde(default)]
    pub recent_matches: Vec<MatchSummary>,
}

/// One line of the rankings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRow {
    pub rank: u32,
    pub team_number: String,
    pub team_name: String,
    pub record: String,
    pub matches_played: u32,
    pub auto_score: f64,
    pub driver_score: f64,
    pub end_score: f64,
    pub total_points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub code: String,
    pub name: String,
    pub start: String,
    pub finished: bool,
    pub ongoing: bool,
    pub started: bool,
    pub live_stream_url: Option<String>,
    pub website: Option<String>,
}

/// A played match from the operating team's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub event_code: String,
    pub match_num: u32,
    pub alliance: Alliance,
    pub team_score: i64,
    pub opponent_score: i64,
    pub outcome: MatchOutcome,
    pub start_time: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    Win,
    Loss,
    Tie,
}

impl MatchOutcome {
    /// Strictly greater wins, strictly less loses, equal ties.
    pub fn from_scores(own: i64, opponent: i64) -> Self {
        match own.cmp(&opponent) {
            std::cmp::Ordering::Greater => MatchOutcome::Win,
            std::cmp::Ordering::Less => MatchOutcome::Loss,
            std::cmp::Ordering::Equal => MatchOutcome::Tie,
        }
    }
}

// == Record ==
/// Win/loss/tie tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Record {
    pub fn add(&mut self, outcome: MatchOutcome) {
        match outcome {
            MatchOutcome::Win => self.wins += 1,
            MatchOutcome::Loss => self.losses += 1,
            MatchOutcome::Tie => self.ties += 1,
        }
    }

    pub fn played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.wins, self.losses, self.ties)
    }
}

// == Team Stats ==
/// Headline numbers for the operating team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub rank: u32,
    pub total_teams: usize,
    pub record: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub avg_auto: f64,
    pub avg_tele_op: f64,
    pub avg_endgame: f64,
    pub total_points: f64,
    pub matches_played: u32,
    pub quick_stats: Option<QuickStatRanks>,
}

/// Season-wide ranks across all teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickStatRanks {
    pub total: u32,
    pub driver: u32,
    pub auto: u32,
}

// == Achievements ==
/// Trophy styling derived from placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrophyTier {
    Gold,
    Silver,
    Bronze,
}

impl TrophyTier {
    pub fn from_placement(placement: u32) -> Self {
        match placement {
            1 => TrophyTier::Gold,
            2 => TrophyTier::Silver,
            _ => TrophyTier::Bronze,
        }
    }
}

/// An award placement worth showing on the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub award: String,
    pub place: String,
    pub icon: TrophyTier,
    pub year: i32,
    pub event_name: String,
}
