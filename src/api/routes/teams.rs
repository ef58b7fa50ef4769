use axum::extract::{Path, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::{load_dataset, ApiError};
use crate::calculate::summarize_team;
use crate::models::{TeamId, TeamSummary};

/// Team summary. A team that is subscribed or scheduled but has no recorded
/// stats yet gets a zeroed summary; a team nothing refers to is a 404.
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TeamSummary>, ApiError> {
    let id = TeamId::from(id);
    let dataset = load_dataset(&state)?;

    let known = dataset.stats.iter().any(|s| s.team_id == id)
        || dataset.subscriptions.iter().any(|s| s.team_id == id)
        || dataset.results.iter().any(|r| r.involves(&id));
    if !known {
        return Err(ApiError::NotFound(format!("team {}", id)));
    }

    Ok(Json(summarize_team(&dataset.stats, &id)))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::{get_json, setup_test_state};
    use crate::models::{MatchResult, ParticipantMatchStat, Subscription};
    use crate::storage::{EntityType, JsonlWriter};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_get_team() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        JsonlWriter::<ParticipantMatchStat>::for_entity(&state.storage, EntityType::MatchStat)
            .write_all(&[
                ParticipantMatchStat::new("p1".into(), "m1".into(), "a".into(), "jett".into())
                    .with_kda(20, 10, 4),
                ParticipantMatchStat::new("p2".into(), "m1".into(), "a".into(), "sova".into())
                    .with_kda(10, 10, 6)
                    .with_mvp(),
                ParticipantMatchStat::new("p1".into(), "m2".into(), "a".into(), "jett".into())
                    .with_kda(15, 10, 5),
            ])
            .unwrap();
        JsonlWriter::<MatchResult>::for_entity(&state.storage, EntityType::MatchResult)
            .write_all(&[
                MatchResult::new("m1".into(), "c1".into(), "a".into(), "b".into())
                    .with_winner("a".into()),
                MatchResult::new("m2".into(), "c1".into(), "b".into(), "a".into())
                    .with_winner("a".into()),
            ])
            .unwrap();

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/teams/a").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["player_count"], 2);
        assert_eq!(json["total_kills"], 45);
        assert_eq!(json["mvp_count"], 1);
        assert_eq!(json["match_count"], 2);
        assert_eq!(json["wins"], 2);
        assert_eq!(json["win_rate"], 1.0);
        assert_eq!(json["kda_ratio"], 2.0);
    }

    #[tokio::test]
    async fn test_get_team_subscribed_without_matches() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_test_state(tmp.path());
        JsonlWriter::<Subscription>::for_entity(&state.storage, EntityType::Subscription)
            .append(&Subscription::new("c1".into(), "rookies".into()))
            .unwrap();

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/teams/rookies").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["match_count"], 0);
        assert_eq!(json["win_rate"], 0.0);
    }

    #[tokio::test]
    async fn test_get_team_unknown() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));

        let (status, _) = get_json(app, "/api/teams/ghosts").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
