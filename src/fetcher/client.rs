//! FTCScout GraphQL client.
//!
//! Issues the single team results query and decodes the response envelope.

use std::time::Duration;

use reqwest::{header, Client};
use serde_json::json;
use tracing::debug;

use crate::config::Config;
use crate::error::{FetchError, FetchResult};
use crate::models::ftcscout::{GraphQlResponse, TeamData, TeamQueryData};

/// Team quick stats, award history, season events with every participant's
/// stats, and season matches, in one round trip.
const TEAM_RESULTS_QUERY: &str = r#"
query TeamResults($number: Int!, $season: Int!) {
  teamByNumber(number: $number) {
    number
    name
    quickStats(season: $season) {
      tot { rank }
      dc { rank }
      auto { rank }
    }
    awards {
      type
      season
      placement
      event { name }
    }
    events(season: $season) {
      event {
        code
        name
        start
        venue
        finished
        ongoing
        started
        liveStreamURL
        website
        teams {
          teamNumber
          team { name }
          stats { ...RankingStats }
        }
      }
      stats { ...RankingStats }
    }
    matches(season: $season) {
      eventCode
      alliance
      match {
        matchNum
        hasBeenPlayed
        scheduledStartTime
        actualStartTime
        scores {
          ... on MatchScores2024 { red { totalPoints } blue { totalPoints } }
          ... on MatchScores2025 { red { totalPoints } blue { totalPoints } }
        }
      }
    }
  }
}

fragment RankingStats on TeamEventStats {
  ... on TeamEventStats2024 {
    rank rp wins losses ties qualMatchesPlayed
    avg { autoPoints dcPoints egPoints totalPoints }
  }
  ... on TeamEventStats2025 {
    rank rp wins losses ties qualMatchesPlayed
    avg { autoPoints dcPoints egPoints totalPoints }
  }
}
"#;

/// Client for the upstream GraphQL API.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Debug, Clone)]
pub struct FtcScoutClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl FtcScoutClient {
    /// Builds a client with the configured endpoint, token and timeout.
    pub fn new(config: &Config) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self::with_client(client, config.api_url.clone(), config.api_token.clone()))
    }

    /// Wraps an existing reqwest client, sharing its connection pool.
    pub fn with_client(client: Client, endpoint: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            token,
        }
    }

    /// Fetches everything the site shows about `team_number` in `season`.
    pub async fn fetch_team(&self, team_number: u32, season: i32) -> FetchResult<TeamData> {
        let body = json!({
            "query": TEAM_RESULTS_QUERY,
            "variables": { "number": team_number, "season": season },
        });

        debug!("Querying {} for team {} season {}", self.endpoint, team_number, season);

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::from_status(status, &text));
        }

        decode_team_response(&text, team_number)
    }
}

/// Decodes a GraphQL response body into the team payload.
pub fn decode_team_response(text: &str, team_number: u32) -> FetchResult<TeamData> {
    let envelope: GraphQlResponse<TeamQueryData> =
        serde_json::from_str(text).map_err(|e| FetchError::Malformed(e.to_string()))?;

    if !envelope.errors.is_empty() {
        let messages: Vec<&str> = envelope.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(FetchError::Query(messages.join("; ")));
    }

    envelope
        .data
        .and_then(|data| data.team_by_number)
        .ok_or(FetchError::TeamNotFound(team_number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success() {
        let text = r#"{"data": {"teamByNumber": {"number": 24358, "name": "Ragnarok"}}}"#;
        let team = decode_team_response(text, 24358).unwrap();

        assert_eq!(team.name, "Ragnarok");
        assert!(team.awards.is_empty());
        assert!(team.events.is_empty());
    }

    #[test]
    fn test_decode_graphql_errors() {
        let text = r#"{"data": null, "errors": [{"message": "bad season"}, {"message": "try again"}]}"#;
        let err = decode_team_response(text, 24358).unwrap_err();

        assert!(matches!(err, FetchError::Query(ref m) if m == "bad season; try again"));
    }

    #[test]
    fn test_decode_unknown_team() {
        let text = r#"{"data": {"teamByNumber": null}}"#;
        let err = decode_team_response(text, 99999).unwrap_err();

        assert!(matches!(err, FetchError::TeamNotFound(99999)));
    }

    #[test]
    fn test_decode_malformed() {
        let err = decode_team_response("<html>gateway timeout</html>", 24358).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn test_client_builds_from_default_config() {
        assert!(FtcScoutClient::new(&Config::default()).is_ok());
    }
}
