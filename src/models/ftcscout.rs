//! FTCScout GraphQL wire types
//!
//! Shapes of the upstream response for the team results query. Only the
//! fields the service reads are declared; everything else is ignored.

use serde::{Deserialize, Serialize};

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Root of the team results query.
#[derive(Debug, Deserialize)]
pub struct TeamQueryData {
    #[serde(rename = "teamByNumber")]
    pub team_by_number: Option<TeamData>,
}

/// Everything the site displays about one team for one season.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamData {
    pub number: u32,
    pub name: String,
    pub quick_stats: Option<QuickStats>,
    #[serde(default)]
    pub awards: Vec<Award>,
    #[serde(default)]
    pub events: Vec<TeamEventParticipation>,
    #[serde(default)]
    pub matches: Vec<TeamMatch>,
}

/// Season-wide percentile ranks.
#[derive(Debug, Clone, Deserialize)]
pub struct QuickStats {
    pub tot: QuickStat,
    pub dc: QuickStat,
    pub auto: QuickStat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuickStat {
    pub rank: u32,
}

/// One award as reported upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct Award {
    /// Award type code, e.g. `Inspire` or `Control`
    #[serde(rename = "type")]
    pub award_type: String,
    pub season: i32,
    pub placement: u32,
    pub event: EventName,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventName {
    pub name: String,
}

/// The team's attendance at one event.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamEventParticipation {
    pub event: Event,
    /// The team's own stats; absent before the event starts
    pub stats: Option<TeamEventStats>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub code: String,
    pub name: String,
    /// Start date, `YYYY-MM-DD`
    pub start: String,
    pub venue: Option<String>,
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub ongoing: bool,
    #[serde(default)]
    pub started: bool,
    #[serde(rename = "liveStreamURL")]
    pub live_stream_url: Option<String>,
    pub website: Option<String>,
    /// Every team registered at the event with its ranking stats
    #[serde(default)]
    pub teams: Vec<EventTeam>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTeam {
    pub team_number: u32,
    pub team: TeamName,
    pub stats: Option<TeamEventStats>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamName {
    pub name: String,
}

/// Ranking statistics for a team at an event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamEventStats {
    pub rank: u32,
    #[serde(default)]
    pub rp: f64,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    #[serde(default)]
    pub qual_matches_played: u32,
    pub avg: Option<ScoreBreakdown>,
}

/// Per-phase point averages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    #[serde(default)]
    pub auto_points: f64,
    #[serde(default)]
    pub dc_points: f64,
    #[serde(default)]
    pub eg_points: f64,
    #[serde(default)]
    pub total_points: f64,
}

/// The team's participation in one match.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMatch {
    pub event_code: String,
    pub alliance: Alliance,
    #[serde(rename = "match")]
    pub match_info: Match,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Alliance {
    Red,
    Blue,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub match_num: u32,
    #[serde(default)]
    pub has_been_played: bool,
    pub scheduled_start_time: Option<String>,
    pub actual_start_time: Option<String>,
    pub scores: Option<MatchScores>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchScores {
    pub red: AllianceScore,
    pub blue: AllianceScore,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllianceScore {
    pub total_points: i64,
}

impl MatchScores {
    /// Returns (own score, opponent score) for the given alliance.
    pub fn split(&self, alliance: Alliance) -> (i64, i64) {
        match alliance {
            Alliance::Red => (self.red.total_points, self.blue.total_points),
            Alliance::Blue => (self.blue.total_points, self.red.total_points),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_team_query() {
        let json = r#"{
            "data": {
                "teamByNumber": {
                    "number": 24358,
                    "name": "Ragnarok",
                    "quickStats": {"tot": {"rank": 120}, "dc": {"rank": 98}, "auto": {"rank": 301}},
                    "awards": [
                        {"type": "Control", "season": 2024, "placement": 2, "event": {"name": "Iowa State Championship"}}
                    ],
                    "events": [],
                    "matches": [
                        {
                            "eventCode": "USIACMP",
                            "alliance": "Blue",
                            "match": {
                                "matchNum": 4,
                                "hasBeenPlayed": true,
                                "scheduledStartTime": "2025-02-08T15:00:00Z",
                                "actualStartTime": null,
                                "scores": {"red": {"totalPoints": 40}, "blue": {"totalPoints": 55}}
                            }
                        }
                    ]
                }
            }
        }"#;

        let response: GraphQlResponse<TeamQueryData> = serde_json::from_str(json).unwrap();
        assert!(response.errors.is_empty());

        let team = response.data.unwrap().team_by_number.unwrap();
        assert_eq!(team.number, 24358);
        assert_eq!(team.quick_stats.unwrap().dc.rank, 98);
        assert_eq!(team.awards[0].award_type, "Control");

        let played = &team.matches[0];
        assert_eq!(played.alliance, Alliance::Blue);
        assert_eq!(played.match_info.scores.as_ref().unwrap().split(Alliance::Blue), (55, 40));
    }

    #[test]
    fn test_deserialize_errors_without_data() {
        let json = r#"{"data": null, "errors": [{"message": "Unknown season"}]}"#;
        let response: GraphQlResponse<TeamQueryData> = serde_json::from_str(json).unwrap();

        assert!(response.data.is_none());
        assert_eq!(response.errors[0].message, "Unknown season");
    }

    #[test]
    fn test_score_split() {
        let scores = MatchScores {
            red: AllianceScore { total_points: 10 },
            blue: AllianceScore { total_points: 8 },
        };
        assert_eq!(scores.split(Alliance::Red), (10, 8));
        assert_eq!(scores.split(Alliance::Blue), (8, 10));
    }
}
