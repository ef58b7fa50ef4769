//! Raw per-match participant statistics.

use serde::{Deserialize, Serialize};

use super::numeric::lenient;
use super::{AgentId, MapId, MatchId, ParticipantId, TeamId};

/// One player's performance in one match.
///
/// Recorded once by match-result entry and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantMatchStat {
    /// Player (or coach) this line belongs to
    pub participant_id: ParticipantId,

    /// Match the line was recorded in
    pub match_id: MatchId,

    /// Team the participant played for in this match
    pub team_id: TeamId,

    /// Agent played
    pub agent_id: AgentId,

    #[serde(default, deserialize_with = "lenient::count")]
    pub kills: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub deaths: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub assists: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub spike_plants: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub spike_defuses: u32,

    /// Awarded MVP of the match
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_mvp: bool,

    /// Got the opening kill
    #[serde(default, deserialize_with = "lenient::flag")]
    pub first_kill: bool,

    /// Map the match was played on, usually filled from the match result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_id: Option<MapId>,

    /// Whether the participant's team won; `None` while unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub won: Option<bool>,
}

impl ParticipantMatchStat {
    /// Create a zeroed stat line.
    pub fn new(
        participant_id: ParticipantId,
        match_id: MatchId,
        team_id: TeamId,
        agent_id: AgentId,
    ) -> Self {
        Self {
            participant_id,
            match_id,
            team_id,
            agent_id,
            kills: 0,
            deaths: 0,
            assists: 0,
            spike_plants: 0,
            spike_defuses: 0,
            is_mvp: false,
            first_kill: false,
            map_id: None,
            won: None,
        }
    }

    /// Builder method to set kills, deaths and assists.
    pub fn with_kda(mut self, kills: u32, deaths: u32, assists: u32) -> Self {
        self.kills = kills;
        self.deaths = deaths;
        self.assists = assists;
        self
    }

    /// Builder method to set spike plants and defuses.
    pub fn with_spikes(mut self, plants: u32, defuses: u32) -> Self {
        self.spike_plants = plants;
        self.spike_defuses = defuses;
        self
    }

    /// Builder method to flag the MVP.
    pub fn with_mvp(mut self) -> Self {
        self.is_mvp = true;
        self
    }

    /// Builder method to flag the opening kill.
    pub fn with_first_kill(mut self) -> Self {
        self.first_kill = true;
        self
    }

    /// Builder method to set the map.
    pub fn with_map(mut self, map_id: MapId) -> Self {
        self.map_id = Some(map_id);
        self
    }

    /// Builder method to set the outcome.
    pub fn with_outcome(mut self, won: bool) -> Self {
        self.won = Some(won);
        self
    }

    /// Storage identity: one line per participant per match.
    pub fn record_key(&self) -> (ParticipantId, MatchId) {
        (self.participant_id.clone(), self.match_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let stat = ParticipantMatchStat::new("p1".into(), "m1".into(), "t1".into(), "jett".into())
            .with_kda(21, 14, 6)
            .with_spikes(2, 1)
            .with_mvp()
            .with_first_kill()
            .with_map("ascent".into())
            .with_outcome(true);

        assert_eq!(stat.kills, 21);
        assert_eq!(stat.deaths, 14);
        assert_eq!(stat.assists, 6);
        assert_eq!(stat.spike_plants, 2);
        assert_eq!(stat.spike_defuses, 1);
        assert!(stat.is_mvp);
        assert!(stat.first_kill);
        assert_eq!(stat.map_id, Some("ascent".into()));
        assert_eq!(stat.won, Some(true));
    }

    #[test]
    fn test_record_key_ignores_stat_values() {
        let a = ParticipantMatchStat::new("p1".into(), "m1".into(), "t1".into(), "jett".into());
        let b = a.clone().with_kda(30, 2, 4);
        let c = ParticipantMatchStat::new("p1".into(), "m2".into(), "t1".into(), "jett".into());

        assert_eq!(a.record_key(), b.record_key());
        assert_ne!(a.record_key(), c.record_key());
    }

    #[test]
    fn test_record_key_separator_in_ids() {
        let a = ParticipantMatchStat::new("a|b".into(), "c".into(), "t1".into(), "jett".into());
        let b = ParticipantMatchStat::new("a".into(), "b|c".into(), "t1".into(), "jett".into());

        assert_ne!(a.record_key(), b.record_key());
    }

    #[test]
    fn test_deserialize_api_payload() {
        let json = r#"{
            "participant_id": 11,
            "match_id": "204",
            "team_id": 3,
            "agent_id": "sova",
            "kills": "17",
            "deaths": 12,
            "assists": null,
            "is_mvp": "true",
            "first_kill": 0
        }"#;

        let stat: ParticipantMatchStat = serde_json::from_str(json).unwrap();
        assert_eq!(stat.participant_id.as_str(), "11");
        assert_eq!(stat.team_id.as_str(), "3");
        assert_eq!(stat.kills, 17);
        assert_eq!(stat.deaths, 12);
        assert_eq!(stat.assists, 0);
        assert_eq!(stat.spike_plants, 0);
        assert!(stat.is_mvp);
        assert!(!stat.first_kill);
        assert!(stat.won.is_none());
    }

    #[test]
    fn test_serialization_skips_unknown_outcome() {
        let stat = ParticipantMatchStat::new("p1".into(), "m1".into(), "t1".into(), "jett".into());
        let json = serde_json::to_string(&stat).unwrap();
        assert!(!json.contains("won"));
        assert!(!json.contains("map_id"));

        let back: ParticipantMatchStat = serde_json::from_str(&json).unwrap();
        assert_eq!(stat, back);
    }
}
