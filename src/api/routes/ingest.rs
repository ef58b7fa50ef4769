use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{MatchResult, ParticipantMatchStat, Subscription};
use crate::storage::{EntityType, JsonlWriter};

#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub stored: usize,
}

/// Reject a batch with a blank id, naming the first offending record.
pub fn validate_stats(stats: &[ParticipantMatchStat]) -> Result<(), String> {
    for (i, stat) in stats.iter().enumerate() {
        if stat.participant_id.as_str().is_empty()
            || stat.match_id.as_str().is_empty()
            || stat.team_id.as_str().is_empty()
        {
            return Err(format!("record {} has an empty id", i));
        }
    }
    Ok(())
}

pub fn validate_results(results: &[MatchResult]) -> Result<(), String> {
    for (i, result) in results.iter().enumerate() {
        if result.match_id.as_str().is_empty() || result.championship_id.as_str().is_empty() {
            return Err(format!("record {} has an empty id", i));
        }
        if result.team_a_id == result.team_b_id {
            return Err(format!(
                "record {}: team {} cannot play itself",
                i, result.team_a_id
            ));
        }
        if let Some(winner) = &result.winner_team_id {
            if !result.involves(winner) {
                return Err(format!(
                    "record {}: winner {} did not play match {}",
                    i, winner, result.match_id
                ));
            }
        }
    }
    Ok(())
}

pub fn validate_subscriptions(subscriptions: &[Subscription]) -> Result<(), String> {
    for (i, sub) in subscriptions.iter().enumerate() {
        if sub.championship_id.as_str().is_empty() || sub.team_id.as_str().is_empty() {
            return Err(format!("record {} has an empty id", i));
        }
    }
    Ok(())
}

fn store<T: Serialize>(
    state: &AppState,
    entity: EntityType,
    records: &[T],
    validate: impl Fn(&[T]) -> Result<(), String>,
) -> Result<(StatusCode, Json<StoreResponse>), ApiError> {
    if records.is_empty() {
        return Err(ApiError::BadRequest("no records supplied".to_string()));
    }
    validate(records).map_err(ApiError::BadRequest)?;

    let stored = JsonlWriter::for_entity(&state.storage, entity).append_batch(records)?;
    tracing::info!("Stored {} {:?} records", stored, entity);

    Ok((StatusCode::CREATED, Json(StoreResponse { stored })))
}

pub async fn store_stats(
    State(state): State<AppState>,
    Json(stats): Json<Vec<ParticipantMatchStat>>,
) -> Result<(StatusCode, Json<StoreResponse>), ApiError> {
    store(&state, EntityType::MatchStat, &stats, validate_stats)
}

pub async fn store_results(
    State(state): State<AppState>,
    Json(results): Json<Vec<MatchResult>>,
) -> Result<(StatusCode, Json<StoreResponse>), ApiError> {
    store(&state, EntityType::MatchResult, &results, validate_results)
}

pub async fn store_subscriptions(
    State(state): State<AppState>,
    Json(subscriptions): Json<Vec<Subscription>>,
) -> Result<(StatusCode, Json<StoreResponse>), ApiError> {
    store(
        &state,
        EntityType::Subscription,
        &subscriptions,
        validate_subscriptions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::build_router;
    use crate::api::test_support::{post_json, setup_test_state};
    use crate::storage::JsonlReader;
    use serde_json::json;

    #[tokio::test]
    async fn test_store_stats() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        let app = build_router(state.clone());

        let (status, json) = post_json(
            app,
            "/api/stats",
            json!([
                {"participant_id": 1, "match_id": 10, "team_id": 100, "agent_id": "jett", "kills": 20, "deaths": 12, "assists": 4},
                {"participant_id": 2, "match_id": 10, "team_id": 100, "agent_id": "sova", "kills": "9", "deaths": 14}
            ]),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["stored"], 2);

        let stored =
            JsonlReader::<ParticipantMatchStat>::for_entity(&state.storage, EntityType::MatchStat)
                .read_all()
                .unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].kills, 9);
    }

    #[tokio::test]
    async fn test_store_empty_batch() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));

        let (status, json) = post_json(app, "/api/subscriptions", json!([])).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_store_results_rejects_foreign_winner() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));

        let (status, _) = post_json(
            app,
            "/api/results",
            json!([{"match_id": 1, "championship_id": 1, "team_a_id": "a", "team_b_id": "b", "winner_team_id": "z"}]),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validate_results() {
        let ok = MatchResult::new("m1".into(), "c1".into(), "a".into(), "b".into())
            .with_winner("b".into());
        assert!(validate_results(&[ok]).is_ok());

        let mirror = MatchResult::new("m1".into(), "c1".into(), "a".into(), "a".into());
        assert!(validate_results(&[mirror]).is_err());
    }

    #[test]
    fn test_validate_stats_empty_id() {
        let stat = ParticipantMatchStat::new("".into(), "m1".into(), "t1".into(), "jett".into());
        assert!(validate_stats(&[stat]).is_err());
    }

    #[test]
    fn test_validate_subscriptions() {
        assert!(validate_subscriptions(&[Subscription::new("c1".into(), "a".into())]).is_ok());
        assert!(validate_subscriptions(&[Subscription::new("c1".into(), "".into())]).is_err());
    }
}
