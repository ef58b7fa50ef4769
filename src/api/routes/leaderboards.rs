use std::fmt;
use std::str::FromStr;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{load_dataset, ApiError};
use crate::calculate::{
    rank_players_by_kda, rank_players_by_kills, rank_players_by_mvps, rank_teams_by_win_rate,
    summarize_all_players, summarize_all_teams,
};
use crate::models::{ParticipantMatchStat, PlayerSummary, TeamSummary};
use crate::storage::Dataset;

/// What a player leaderboard is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardMetric {
    #[default]
    Kda,
    Kills,
    Mvps,
}

impl LeaderboardMetric {
    /// Rank player summaries by this metric.
    pub fn rank(&self, summaries: &[PlayerSummary], limit: Option<usize>) -> Vec<PlayerSummary> {
        match self {
            LeaderboardMetric::Kda => rank_players_by_kda(summaries, limit),
            LeaderboardMetric::Kills => rank_players_by_kills(summaries, limit),
            LeaderboardMetric::Mvps => rank_players_by_mvps(summaries, limit),
        }
    }
}

impl FromStr for LeaderboardMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kda" => Ok(LeaderboardMetric::Kda),
            "kills" => Ok(LeaderboardMetric::Kills),
            "mvps" | "mvp" => Ok(LeaderboardMetric::Mvps),
            other => Err(format!(
                "unknown leaderboard metric '{}', expected kda, kills or mvps",
                other
            )),
        }
    }
}

impl fmt::Display for LeaderboardMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardMetric::Kda => write!(f, "kda"),
            LeaderboardMetric::Kills => write!(f, "kills"),
            LeaderboardMetric::Mvps => write!(f, "mvps"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub by: Option<String>,
    pub limit: Option<usize>,
    pub championship: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RankedPlayer {
    pub rank: usize,
    #[serde(flatten)]
    pub summary: PlayerSummary,
}

#[derive(Debug, Serialize)]
pub struct RankedTeam {
    pub rank: usize,
    #[serde(flatten)]
    pub summary: TeamSummary,
}

#[derive(Debug, Serialize)]
pub struct PlayerLeaderboardResponse {
    pub metric: LeaderboardMetric,
    pub players: Vec<RankedPlayer>,
}

#[derive(Debug, Serialize)]
pub struct TeamLeaderboardResponse {
    pub teams: Vec<RankedTeam>,
}

fn scoped_stats(dataset: Dataset, championship: Option<&str>) -> Vec<ParticipantMatchStat> {
    match championship {
        Some(id) => dataset.stats_in_championship(&id.into()),
        None => dataset.stats,
    }
}

/// Player leaderboard over the stored records.
pub fn player_leaderboard_for(
    dataset: Dataset,
    metric: LeaderboardMetric,
    championship: Option<&str>,
    limit: usize,
) -> Vec<RankedPlayer> {
    let summaries = summarize_all_players(&scoped_stats(dataset, championship));
    metric
        .rank(&summaries, Some(limit))
        .into_iter()
        .enumerate()
        .map(|(i, summary)| RankedPlayer {
            rank: i + 1,
            summary,
        })
        .collect()
}

/// Team leaderboard (by win rate) over the stored records.
pub fn team_leaderboard_for(
    dataset: Dataset,
    championship: Option<&str>,
    limit: usize,
) -> Vec<RankedTeam> {
    let summaries = summarize_all_teams(&scoped_stats(dataset, championship));
    rank_teams_by_win_rate(&summaries, Some(limit))
        .into_iter()
        .enumerate()
        .map(|(i, summary)| RankedTeam {
            rank: i + 1,
            summary,
        })
        .collect()
}

pub async fn player_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<PlayerLeaderboardResponse>, ApiError> {
    let metric = match params.by.as_deref() {
        Some(by) => by
            .parse::<LeaderboardMetric>()
            .map_err(ApiError::BadRequest)?,
        None => LeaderboardMetric::default(),
    };
    let limit = state.config.leaderboard.resolve(params.limit);
    let dataset = load_dataset(&state)?;

    Ok(Json(PlayerLeaderboardResponse {
        metric,
        players: player_leaderboard_for(dataset, metric, params.championship.as_deref(), limit),
    }))
}

pub async fn team_leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<TeamLeaderboardResponse>, ApiError> {
    let limit = state.config.leaderboard.resolve(params.limit);
    let dataset = load_dataset(&state)?;

    Ok(Json(TeamLeaderboardResponse {
        teams: team_leaderboard_for(dataset, params.championship.as_deref(), limit),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::build_router;
    use crate::api::test_support::{get_json, setup_test_state};
    use crate::models::MatchResult;
    use crate::storage::{EntityType, JsonlWriter};
    use axum::http::StatusCode;

    fn seed(state: &AppState) {
        let line = |p: &str, m: &str, t: &str, k: u32, d: u32, a: u32| {
            ParticipantMatchStat::new(p.into(), m.into(), t.into(), "jett".into()).with_kda(k, d, a)
        };
        JsonlWriter::<ParticipantMatchStat>::for_entity(&state.storage, EntityType::MatchStat)
            .write_all(&[
                line("ana", "m1", "a", 10, 10, 0),
                line("ben", "m1", "b", 30, 10, 0).with_mvp(),
                line("cal", "m2", "a", 20, 10, 0),
                line("dee", "m2", "c", 20, 10, 0).with_mvp(),
                line("dee", "m3", "c", 5, 5, 0).with_mvp(),
            ])
            .unwrap();
        JsonlWriter::<MatchResult>::for_entity(&state.storage, EntityType::MatchResult)
            .write_all(&[
                MatchResult::new("m1".into(), "c1".into(), "a".into(), "b".into())
                    .with_winner("b".into()),
                MatchResult::new("m2".into(), "c1".into(), "a".into(), "c".into())
                    .with_winner("a".into()),
                MatchResult::new("m3".into(), "c2".into(), "c".into(), "x".into())
                    .with_winner("c".into()),
            ])
            .unwrap();
    }

    #[test]
    fn test_metric_parse() {
        assert_eq!("KDA".parse::<LeaderboardMetric>(), Ok(LeaderboardMetric::Kda));
        assert_eq!("mvp".parse::<LeaderboardMetric>(), Ok(LeaderboardMetric::Mvps));
        assert!("headshots".parse::<LeaderboardMetric>().is_err());
        assert_eq!(LeaderboardMetric::Kills.to_string(), "kills");
    }

    #[tokio::test]
    async fn test_player_leaderboard_default_kda() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        seed(&state);

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/leaderboards/players").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["metric"], "kda");
        let players = json["players"].as_array().unwrap();
        // ben 3.0, cal 2.0, dee 25/15, ana 1.0
        let ids: Vec<&str> = players
            .iter()
            .map(|p| p["participant_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["ben", "cal", "dee", "ana"]);
        assert_eq!(players[0]["rank"], 1);
        assert_eq!(players[3]["rank"], 4);
    }

    #[tokio::test]
    async fn test_player_leaderboard_by_mvps_with_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        seed(&state);

        let app = build_router(state);
        let (_, json) = get_json(app, "/api/leaderboards/players?by=mvps&limit=1").await;

        let players = json["players"].as_array().unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0]["participant_id"], "dee");
        assert_eq!(players[0]["mvp_count"], 2);
    }

    #[tokio::test]
    async fn test_player_leaderboard_championship_scope() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        seed(&state);

        let app = build_router(state);
        let (_, json) = get_json(app, "/api/leaderboards/players?by=kills&championship=c2").await;

        let players = json["players"].as_array().unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0]["total_kills"], 5);
    }

    #[tokio::test]
    async fn test_player_leaderboard_bad_metric() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = get_json(app, "/api/leaderboards/players?by=aces").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_team_leaderboard() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        seed(&state);

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/leaderboards/teams").await;

        assert_eq!(status, StatusCode::OK);
        let teams = json["teams"].as_array().unwrap();
        // b wins 1/1; a and c both 1/2, kept in first-seen order
        let ids: Vec<&str> = teams.iter().map(|t| t["team_id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_leaderboard_limit_capped() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = setup_test_state(tmp.path());
        let mut config = (*state.config).clone();
        config.leaderboard.max_limit = 2;
        config.leaderboard.default_limit = 2;
        state.config = std::sync::Arc::new(config);
        seed(&state);

        let app = build_router(state);
        let (_, json) = get_json(app, "/api/leaderboards/players?limit=50").await;

        assert_eq!(json["players"].as_array().unwrap().len(), 2);
    }
}
