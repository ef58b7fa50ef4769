//! Stateless summary service: the caller supplies the raw records.

use axum::Json;
use serde::Deserialize;

use crate::api::ApiError;
use crate::calculate::{
    attach_outcomes, deduplicate_by_key, rank_players_by_kda, rank_teams_by_win_rate,
    summarize_player, summarize_team,
};
use crate::models::{
    MatchResult, ParticipantId, ParticipantMatchStat, PlayerSummary, TeamId, TeamSummary,
};

#[derive(Debug, Deserialize)]
pub struct PlayerSummaryRequest {
    pub participant_id: ParticipantId,
    #[serde(default)]
    pub stats: Vec<ParticipantMatchStat>,
    /// Optional results used to derive wins and losses
    #[serde(default)]
    pub results: Vec<MatchResult>,
}

#[derive(Debug, Deserialize)]
pub struct TeamSummaryRequest {
    pub team_id: TeamId,
    #[serde(default)]
    pub stats: Vec<ParticipantMatchStat>,
    #[serde(default)]
    pub results: Vec<MatchResult>,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest<T> {
    #[serde(default = "Vec::new")]
    pub summaries: Vec<T>,
    pub limit: Option<usize>,
}

pub async fn player_summary(
    Json(req): Json<PlayerSummaryRequest>,
) -> Result<Json<PlayerSummary>, ApiError> {
    let stats = attach_outcomes(&req.stats, &req.results);
    Ok(Json(summarize_player(&stats, &req.participant_id)))
}

pub async fn team_summary(
    Json(req): Json<TeamSummaryRequest>,
) -> Result<Json<TeamSummary>, ApiError> {
    let stats = attach_outcomes(&req.stats, &req.results);
    Ok(Json(summarize_team(&stats, &req.team_id)))
}

/// Rank caller-supplied player summaries by KDA. Summaries merged from
/// several pages may repeat a participant; the first copy is kept.
pub async fn rank_players(
    Json(req): Json<RankRequest<PlayerSummary>>,
) -> Result<Json<Vec<PlayerSummary>>, ApiError> {
    let unique = deduplicate_by_key(&req.summaries, |s| s.participant_id.clone());
    Ok(Json(rank_players_by_kda(&unique, req.limit)))
}

pub async fn rank_teams(
    Json(req): Json<RankRequest<TeamSummary>>,
) -> Result<Json<Vec<TeamSummary>>, ApiError> {
    let unique = deduplicate_by_key(&req.summaries, |s| s.team_id.clone());
    Ok(Json(rank_teams_by_win_rate(&unique, req.limit)))
}
