use axum::extract::{Path, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::{load_dataset, ApiError};
use crate::calculate::summarize_championship;
use crate::models::{ChampionshipId, ChampionshipOverview};

pub async fn get_championship(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChampionshipOverview>, ApiError> {
    let id = ChampionshipId::from(id);
    let dataset = load_dataset(&state)?;

    let known = dataset.results.iter().any(|r| r.championship_id == id)
        || dataset.subscriptions.iter().any(|s| s.championship_id == id);
    if !known {
        return Err(ApiError::NotFound(format!("championship {}", id)));
    }

    Ok(Json(summarize_championship(
        &dataset.stats,
        &dataset.results,
        &dataset.subscriptions,
        &id,
    )))
}
