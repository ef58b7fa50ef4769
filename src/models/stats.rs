//! Derived statistics models.
//!
//! These are views recomputed from raw [`ParticipantMatchStat`] records on
//! every read; none of them is persisted. They still deserialize leniently
//! because summaries also arrive from other services, where `kda_ratio`
//! has been seen as `"1.50"` as often as `1.5`.
//!
//! [`ParticipantMatchStat`]: super::ParticipantMatchStat

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::numeric::lenient;
use super::{AgentId, ChampionshipId, MapId, ParticipantId, TeamId};
use crate::calculate::{kda_ratio, win_rate};

/// Per-player totals across every recorded match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub participant_id: ParticipantId,

    #[serde(default, deserialize_with = "lenient::count")]
    pub total_kills: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub total_deaths: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub total_assists: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub total_spike_plants: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub total_spike_defuses: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub first_kills: u32,

    /// Distinct matches played
    #[serde(default, deserialize_with = "lenient::count")]
    pub match_count: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub mvp_count: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub wins: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub losses: u32,

    /// (kills + assists) / deaths
    #[serde(default, deserialize_with = "lenient::ratio")]
    pub kda_ratio: f64,

    /// wins / match_count (0.0 to 1.0)
    #[serde(default, deserialize_with = "lenient::ratio")]
    pub win_rate: f64,
}

impl PlayerSummary {
    /// A summary with every counter at zero.
    pub fn empty(participant_id: ParticipantId) -> Self {
        Self {
            participant_id,
            total_kills: 0,
            total_deaths: 0,
            total_assists: 0,
            total_spike_plants: 0,
            total_spike_defuses: 0,
            first_kills: 0,
            match_count: 0,
            mvp_count: 0,
            wins: 0,
            losses: 0,
            kda_ratio: 0.0,
            win_rate: 0.0,
        }
    }

    /// Recompute `kda_ratio` and `win_rate` from the counters.
    pub fn with_derived(mut self) -> Self {
        self.kda_ratio = kda_ratio(self.total_kills, self.total_deaths, self.total_assists);
        self.win_rate = win_rate(self.wins, self.match_count);
        self
    }
}

/// Per-team totals, summed over the team's players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub team_id: TeamId,

    /// Distinct participants who recorded stats for the team
    #[serde(default, deserialize_with = "lenient::count")]
    pub player_count: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub total_kills: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub total_deaths: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub total_assists: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub total_spike_plants: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub total_spike_defuses: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub mvp_count: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub match_count: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub wins: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub losses: u32,

    #[serde(default, deserialize_with = "lenient::ratio")]
    pub kda_ratio: f64,

    #[serde(default, deserialize_with = "lenient::ratio")]
    pub win_rate: f64,
}

impl TeamSummary {
    pub fn empty(team_id: TeamId) -> Self {
        Self {
            team_id,
            player_count: 0,
            total_kills: 0,
            total_deaths: 0,
            total_assists: 0,
            total_spike_plants: 0,
            total_spike_defuses: 0,
            mvp_count: 0,
            match_count: 0,
            wins: 0,
            losses: 0,
            kda_ratio: 0.0,
            win_rate: 0.0,
        }
    }

    /// Recompute `kda_ratio` and `win_rate` from the counters.
    pub fn with_derived(mut self) -> Self {
        self.kda_ratio = kda_ratio(self.total_kills, self.total_deaths, self.total_assists);
        self.win_rate = win_rate(self.wins, self.match_count);
        self
    }
}

/// Headline numbers for one championship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionshipOverview {
    pub championship_id: ChampionshipId,

    /// Distinct subscribed teams
    #[serde(default, deserialize_with = "lenient::count")]
    pub team_count: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub match_count: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub total_kills: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub total_deaths: u32,

    /// Mean KDA of the participants who played in the championship
    #[serde(default, deserialize_with = "lenient::ratio")]
    pub average_kda: f64,

    /// When this overview was computed
    pub computed_at: DateTime<Utc>,
}

/// Performance of one participant on one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStatistic {
    pub participant_id: ParticipantId,
    pub agent_id: AgentId,
    #[serde(flatten)]
    pub record: BreakdownRecord,
}

/// Performance of one participant on one map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapStatistic {
    pub participant_id: ParticipantId,
    pub map_id: MapId,
    #[serde(flatten)]
    pub record: BreakdownRecord,
}

/// Shared body of agent and map breakdown rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRecord {
    #[serde(default, deserialize_with = "lenient::count")]
    pub games_played: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub wins: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub losses: u32,

    #[serde(default, deserialize_with = "lenient::ratio")]
    pub win_rate: f64,

    #[serde(default, deserialize_with = "lenient::count")]
    pub kills: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub deaths: u32,

    #[serde(default, deserialize_with = "lenient::count")]
    pub assists: u32,

    #[serde(default, deserialize_with = "lenient::ratio")]
    pub kda_ratio: f64,
}

impl BreakdownRecord {
    /// Recompute `kda_ratio` and `win_rate` from the counters.
    pub fn with_derived(mut self) -> Self {
        self.kda_ratio = kda_ratio(self.kills, self.deaths, self.assists);
        self.win_rate = win_rate(self.wins, self.games_played);
        self
    }
}
