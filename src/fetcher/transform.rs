//! Transformations from upstream wire types to display models.
//!
//! Pure functions; the fetcher supplies the timestamp.

use chrono::{DateTime, Utc};

use crate::error::{FetchError, FetchResult};
use crate::models::ftcscout::{Award, Event, EventTeam, TeamData, TeamEventParticipation, TeamEventStats, TeamMatch};
use crate::models::{
    Achievement, EventSummary, MatchOutcome, MatchSummary, QuickStatRanks, RankingRow,
    RankingSnapshot, Record, TeamStats, TrophyTier,
};

/// Number of played matches kept in a ranking snapshot.
pub const RECENT_MATCH_LIMIT: usize = 5;

/// Lowest placement still shown as an achievement.
pub const MAX_ACHIEVEMENT_PLACEMENT: u32 = 3;

// == Event Selection ==
/// Picks the event the rankings are taken from: the ongoing one, else the
/// most recently started one, else the next one scheduled.
pub fn select_event(events: &[TeamEventParticipation]) -> Option<&TeamEventParticipation> {
    events
        .iter()
        .find(|p| p.event.ongoing)
        .or_else(|| {
            events
                .iter()
                .filter(|p| p.event.started)
                .max_by(|a, b| a.event.start.cmp(&b.event.start))
        })
        .or_else(|| events.iter().min_by(|a, b| a.event.start.cmp(&b.event.start)))
}

// == Rankings ==
/// Builds the ranking snapshot for `team_number` from the upstream payload.
///
/// Fails when no event has ranked teams or the operating team is absent
/// from the rankings. Row order is the upstream order.
pub fn build_ranking_snapshot(
    team: &TeamData,
    team_number: u32,
    fetched_at: DateTime<Utc>,
) -> FetchResult<RankingSnapshot> {
    let participation = select_event(&team.events).ok_or(FetchError::NoRankings)?;
    let event = &participation.event;

    let rankings: Vec<RankingRow> = event
        .teams
        .iter()
        .filter_map(|entry| entry.stats.as_ref().map(|stats| ranking_row(entry, stats)))
        .collect();

    if rankings.is_empty() {
        return Err(FetchError::NoRankings);
    }

    let own = event
        .teams
        .iter()
        .find(|entry| entry.team_number == team_number)
        .and_then(|entry| entry.stats.as_ref())
        .ok_or(FetchError::TeamNotFound(team_number))?;

    Ok(RankingSnapshot {
        event_name: event.name.clone(),
        start_date: event.start.clone(),
        venue: event.venue.clone().unwrap_or_default(),
        rank: own.rank,
        total_teams: rankings.len(),
        wins: own.wins,
        losses: own.losses,
        ties: own.ties,
        rankings,
        last_updated: fetched_at,
        current_event: Some(event_summary(event)),
        recent_matches: recent_matches(&team.matches, RECENT_MATCH_LIMIT),
    })
}

fn ranking_row(entry: &EventTeam, stats: &TeamEventStats) -> RankingRow {
    let avg = stats.avg.clone().unwrap_or_default();
    let record = Record {
        wins: stats.wins,
        losses: stats.losses,
        ties: stats.ties,
    };

    RankingRow {
        rank: stats.rank,
        team_number: entry.team_number.to_string(),
        team_name: entry.team.name.clone(),
        record: record.to_string(),
        matches_played: stats.qual_matches_played,
        auto_score: avg.auto_points,
        driver_score: avg.dc_points,
        end_score: avg.eg_points,
        total_points: avg.total_points,
    }
}

fn event_summary(event: &Event) -> EventSummary {
    EventSummary {
        code: event.code.clone(),
        name: event.name.clone(),
        start: event.start.clone(),
        finished: event.finished,
        ongoing: event.ongoing,
        started: event.started,
        live_stream_url: event.live_stream_url.clone(),
        website: event.website.clone(),
    }
}

// == Matches ==
/// Played, scored matches from the team's point of view.
fn played_matches(matches: &[TeamMatch]) -> impl Iterator<Item = MatchSummary> + '_ {
    matches.iter().filter(|m| m.match_info.has_been_played).filter_map(|m| {
        let scores = m.match_info.scores.as_ref()?;
        let (own, opponent) = scores.split(m.alliance);

        Some(MatchSummary {
            event_code: m.event_code.clone(),
            match_num: m.match_info.match_num,
            alliance: m.alliance,
            team_score: own,
            opponent_score: opponent,
            outcome: MatchOutcome::from_scores(own, opponent),
            start_time: m
                .match_info
                .actual_start_time
                .clone()
                .or_else(|| m.match_info.scheduled_start_time.clone()),
        })
    })
}

/// Win/loss/tie record over every played, scored match.
pub fn tally_record(matches: &[TeamMatch]) -> Record {
    played_matches(matches).fold(Record::default(), |mut record, summary| {
        record.add(summary.outcome);
        record
    })
}

/// The `limit` most recent played matches, newest first.
pub fn recent_matches(matches: &[TeamMatch], limit: usize) -> Vec<MatchSummary> {
    let mut played: Vec<MatchSummary> = played_matches(matches).collect();
    played.sort_by(|a, b| {
        b.start_time
            .cmp(&a.start_time)
            .then_with(|| b.match_num.cmp(&a.match_num))
    });
    played.truncate(limit);
    played
}

// == Team Stats ==
/// Builds the team's headline stats. Rank and averages come from the
/// team's row in `snapshot`; the record is recounted from the scores of the
/// team's matches at the snapshot's event.
pub fn build_team_stats(
    team: &TeamData,
    snapshot: &RankingSnapshot,
    team_number: u32,
) -> FetchResult<TeamStats> {
    let number = team_number.to_string();
    let row = snapshot
        .rankings
        .iter()
        .find(|row| row.team_number == number)
        .ok_or(FetchError::TeamNotFound(team_number))?;

    let event_matches: Vec<TeamMatch> = match &snapshot.current_event {
        Some(event) => team
            .matches
            .iter()
            .filter(|m| m.event_code == event.code)
            .cloned()
            .collect(),
        None => team.matches.clone(),
    };
    let record = tally_record(&event_matches);

    Ok(TeamStats {
        rank: snapshot.rank,
        total_teams: snapshot.total_teams,
        record: record.to_string(),
        wins: record.wins,
        losses: record.losses,
        ties: record.ties,
        avg_auto: row.auto_score,
        avg_tele_op: row.driver_score,
        avg_endgame: row.end_score,
        total_points: row.total_points,
        matches_played: record.played(),
        quick_stats: team.quick_stats.as_ref().map(|q| QuickStatRanks {
            total: q.tot.rank,
            driver: q.dc.rank,
            auto: q.auto.rank,
        }),
    })
}

// == Achievements ==
/// Keeps top-three placements, labels them, and orders them newest season
/// first. Awards from the same season keep their upstream order.
pub fn build_achievements(awards: &[Award]) -> Vec<Achievement> {
    let mut achievements: Vec<Achievement> = awards
        .iter()
        .filter(|award| (1..=MAX_ACHIEVEMENT_PLACEMENT).contains(&award.placement))
        .map(|award| Achievement {
            id: format!(
                "{}-{}-{}",
                award.season,
                slugify(&award.event.name),
                slugify(&award.award_type)
            ),
            title: format!("{} {}", award.season, award.event.name),
            award: award_label(&award.award_type),
            place: place_label(award.placement),
            icon: TrophyTier::from_placement(award.placement),
            year: award.season,
            event_name: award.event.name.clone(),
        })
        .collect();

    achievements.sort_by(|a, b| b.year.cmp(&a.year));
    achievements
}

/// Display label for an award type code. Unknown codes are shown as-is.
pub fn award_label(code: &str) -> String {
    let label = match code {
        "Inspire" => "Inspire Award",
        "Think" => "Think Award",
        "Connect" => "Connect Award",
        "Innovate" => "Innovate Award",
        "Control" => "Control (Programming) Award",
        "Motivate" => "Motivate Award",
        "Design" => "Design Award",
        "Reach" => "Reach Award",
        "Sustain" => "Sustain Award",
        "Promote" => "Promote Award",
        "Compass" => "Compass Award",
        "JudgesChoice" => "Judges' Choice Award",
        "DeansListWinner" => "Dean's List Winner",
        "DeansListFinalist" => "Dean's List Finalist",
        "DeansListSemiFinalist" => "Dean's List Semi-Finalist",
        "Winner" => "Winning Alliance",
        "Finalist" => "Finalist Alliance",
        "DivisionWinner" => "Division Winner",
        "DivisionFinalist" => "Division Finalist",
        "TopRanked" => "Top Ranked Team",
        other => other,
    };
    label.to_string()
}

/// "1st Place", "2nd Place", ...
pub fn place_label(placement: u32) -> String {
    let suffix = match (placement % 10, placement % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{} Place", placement, suffix)
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Builders for upstream payloads shared by the fetcher tests.

    use crate::models::ftcscout::*;

    pub fn stats(rank: u32, wins: u32, losses: u32, ties: u32, avg: [f64; 4]) -> TeamEventStats {
        TeamEventStats {
            rank,
            rp: 0.0,
            wins,
            losses,
            ties,
            qual_matches_played: wins + losses + ties,
            avg: Some(ScoreBreakdown {
                auto_points: avg[0],
                dc_points: avg[1],
                eg_points: avg[2],
                total_points: avg[3],
            }),
        }
    }

    pub fn entry(number: u32, name: &str, stats: Option<TeamEventStats>) -> EventTeam {
        EventTeam {
            team_number: number,
            team: TeamName { name: name.to_string() },
            stats,
        }
    }

    pub fn event(code: &str, start: &str, started: bool, ongoing: bool, teams: Vec<EventTeam>) -> TeamEventParticipation {
        TeamEventParticipation {
            event: Event {
                code: code.to_string(),
                name: format!("{} Meet", code),
                start: start.to_string(),
                venue: Some("Waukee Northwest".to_string()),
                finished: started && !ongoing,
                ongoing,
                started,
                live_stream_url: None,
                website: None,
                teams,
            },
            stats: None,
        }
    }

    pub fn played(alliance: Alliance, num: u32, red: i64, blue: i64, time: &str) -> TeamMatch {
        TeamMatch {
            event_code: "USIAACPS1".to_string(),
            alliance,
            match_info: Match {
                match_num: num,
                has_been_played: true,
                scheduled_start_time: Some(time.to_string()),
                actual_start_time: None,
                scores: Some(MatchScores {
                    red: AllianceScore { total_points: red },
                    blue: AllianceScore { total_points: blue },
                }),
            },
        }
    }

    pub fn award(award_type: &str, season: i32, placement: u32, event: &str) -> Award {
        Award {
            award_type: award_type.to_string(),
            season,
            placement,
            event: EventName { name: event.to_string() },
        }
    }

    pub fn team(events: Vec<TeamEventParticipation>, matches: Vec<TeamMatch>) -> TeamData {
        TeamData {
            number: 24358,
            name: "Ragnarok".to_string(),
            quick_stats: Some(QuickStats {
                tot: QuickStat { rank: 150 },
                dc: QuickStat { rank: 120 },
                auto: QuickStat { rank: 300 },
            }),
            awards: vec![],
            events,
            matches,
        }
    }

    /// League meet with three ranked teams including 24358.
    pub fn league_team(matches: Vec<TeamMatch>) -> TeamData {
        team(
            vec![event(
                "USIAACPS1",
                "2025-11-15",
                true,
                false,
                vec![
                    entry(11111, "Gearheads", Some(stats(1, 5, 0, 0, [30.0, 60.0, 10.0, 100.0]))),
                    entry(24358, "Ragnarok", Some(stats(2, 4, 1, 0, [25.0, 50.0, 8.0, 83.0]))),
                    entry(22222, "Circuit Breakers", Some(stats(3, 1, 4, 0, [10.0, 30.0, 2.0, 42.0]))),
                ],
            )],
            matches,
        )
    }
}
