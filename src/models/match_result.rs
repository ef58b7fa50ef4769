//! Match results and championship subscriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChampionshipId, MapId, MatchId, TeamId};

/// The recorded outcome of a match between two teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_id: MatchId,

    /// Championship the match was played in
    pub championship_id: ChampionshipId,

    /// Map, if the match was a single-map series
    #[serde(default)]
    pub map_id: Option<MapId>,

    pub team_a_id: TeamId,

    pub team_b_id: TeamId,

    /// Winning team; `None` while the match is unplayed
    #[serde(default)]
    pub winner_team_id: Option<TeamId>,

    /// When the match was played
    #[serde(default)]
    pub played_at: Option<DateTime<Utc>>,
}

impl MatchResult {
    /// Create an unplayed match.
    pub fn new(
        match_id: MatchId,
        championship_id: ChampionshipId,
        team_a_id: TeamId,
        team_b_id: TeamId,
    ) -> Self {
        Self {
            match_id,
            championship_id,
            map_id: None,
            team_a_id,
            team_b_id,
            winner_team_id: None,
            played_at: None,
        }
    }

    /// Builder method to set the winner.
    pub fn with_winner(mut self, team_id: TeamId) -> Self {
        self.winner_team_id = Some(team_id);
        self
    }

    /// Builder method to set the map.
    pub fn with_map(mut self, map_id: MapId) -> Self {
        self.map_id = Some(map_id);
        self
    }

    /// Whether `team_id` played in this match.
    pub fn involves(&self, team_id: &TeamId) -> bool {
        &self.team_a_id == team_id || &self.team_b_id == team_id
    }

    /// Outcome for `team_id`: `Some(true)` on a win, `Some(false)` on a loss,
    /// `None` if there is no winner yet.
    pub fn outcome_for(&self, team_id: &TeamId) -> Option<bool> {
        self.winner_team_id
            .as_ref()
            .map(|winner| winner == team_id)
    }
}

/// A team's enrollment in a championship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub championship_id: ChampionshipId,
    pub team_id: TeamId,
}

impl Subscription {
    pub fn new(championship_id: ChampionshipId, team_id: TeamId) -> Self {
        Self {
            championship_id,
            team_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_for() {
        let result = MatchResult::new("m1".into(), "c1".into(), "a".into(), "b".into())
            .with_winner("a".into());

        assert_eq!(result.outcome_for(&"a".into()), Some(true));
        assert_eq!(result.outcome_for(&"b".into()), Some(false));
    }

    #[test]
    fn test_outcome_unplayed() {
        let result = MatchResult::new("m1".into(), "c1".into(), "a".into(), "b".into());
        assert_eq!(result.outcome_for(&"a".into()), None);
    }

    #[test]
    fn test_involves() {
        let result = MatchResult::new("m1".into(), "c1".into(), "a".into(), "b".into());
        assert!(result.involves(&"a".into()));
        assert!(result.involves(&"b".into()));
        assert!(!result.involves(&"c".into()));
    }

    #[test]
    fn test_deserialize_minimal_result() {
        let json = r#"{"match_id": 9, "championship_id": 1, "team_a_id": 4, "team_b_id": 5, "winner_team_id": 5}"#;
        let result: MatchResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.winner_team_id, Some("5".into()));
        assert!(result.map_id.is_none());
        assert!(result.played_at.is_none());
    }

    #[test]
    fn test_subscription_numeric_ids() {
        let sub: Subscription =
            serde_json::from_str(r#"{"championship_id": 1, "team_id": "A"}"#).unwrap();
        assert_eq!(sub, Subscription::new("1".into(), "A".into()));
    }
}
