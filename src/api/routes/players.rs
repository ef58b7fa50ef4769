use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{load_dataset, ApiError, Pagination, PaginationMeta};
use crate::calculate::{agent_breakdown, map_breakdown, summarize_all_players, summarize_player};
use crate::models::{AgentStatistic, MapStatistic, ParticipantId, PlayerSummary};
use crate::storage::Dataset;

#[derive(Debug, Deserialize)]
pub struct PlayerListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub championship: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlayerListResponse {
    pub players: Vec<PlayerSummary>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize)]
pub struct AgentBreakdownResponse {
    pub participant_id: ParticipantId,
    pub agents: Vec<AgentStatistic>,
}

#[derive(Debug, Serialize)]
pub struct MapBreakdownResponse {
    pub participant_id: ParticipantId,
    pub maps: Vec<MapStatistic>,
}

/// Load the dataset and make sure the participant has recorded stats.
fn load_for_player(state: &AppState, id: &ParticipantId) -> Result<Dataset, ApiError> {
    let dataset = load_dataset(state)?;
    if !dataset.stats.iter().any(|s| &s.participant_id == id) {
        return Err(ApiError::NotFound(format!("player {}", id)));
    }
    Ok(dataset)
}

pub async fn list_players(
    State(state): State<AppState>,
    Query(params): Query<PlayerListParams>,
) -> Result<Json<PlayerListResponse>, ApiError> {
    let dataset = load_dataset(&state)?;
    let stats = match params.championship.as_deref() {
        Some(id) => dataset.stats_in_championship(&id.into()),
        None => dataset.stats,
    };

    let summaries = summarize_all_players(&stats);
    let pagination = Pagination::new(params.page, params.page_size);
    let meta = PaginationMeta::new(&pagination, summaries.len() as u32);

    Ok(Json(PlayerListResponse {
        players: pagination.apply(&summaries).to_vec(),
        pagination: meta,
    }))
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlayerSummary>, ApiError> {
    let id = ParticipantId::from(id);
    let dataset = load_for_player(&state, &id)?;
    Ok(Json(summarize_player(&dataset.stats, &id)))
}

pub async fn player_agents(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AgentBreakdownResponse>, ApiError> {
    let id = ParticipantId::from(id);
    let dataset = load_for_player(&state, &id)?;
    Ok(Json(AgentBreakdownResponse {
        agents: agent_breakdown(&dataset.stats, &id),
        participant_id: id,
    }))
}

pub async fn player_maps(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MapBreakdownResponse>, ApiError> {
    let id = ParticipantId::from(id);
    let dataset = load_for_player(&state, &id)?;
    Ok(Json(MapBreakdownResponse {
        maps: map_breakdown(&dataset.stats, &id),
        participant_id: id,
    }))
}
