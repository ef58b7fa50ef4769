//! Player, team and championship summaries.

use std::collections::{HashMap, HashSet};

use chrono::Utc;

use crate::models::{
    ChampionshipId, ChampionshipOverview, MatchId, MatchResult, ParticipantId,
    ParticipantMatchStat, PlayerSummary, Subscription, TeamId, TeamSummary,
};

use super::rank::{count_unique_teams_in_championship, deduplicate_by_key};

/// Outcome of each distinct match seen in a set of records.
#[derive(Default)]
pub(super) struct MatchTally<'a> {
    outcomes: HashMap<&'a MatchId, Option<bool>>,
}

impl<'a> MatchTally<'a> {
    pub(super) fn record(&mut self, stat: &'a ParticipantMatchStat) {
        let outcome = self.outcomes.entry(&stat.match_id).or_insert(None);
        if outcome.is_none() {
            *outcome = stat.won;
        }
    }

    pub(super) fn matches(&self) -> u32 {
        self.outcomes.len() as u32
    }

    pub(super) fn wins(&self) -> u32 {
        self.outcomes.values().filter(|o| **o == Some(true)).count() as u32
    }

    pub(super) fn losses(&self) -> u32 {
        self.outcomes.values().filter(|o| **o == Some(false)).count() as u32
    }
}

/// Join raw stat lines with match results.
///
/// Returns copies whose `won` and `map_id` come from the result with the
/// same `match_id`. A result only decides the outcome of a team that played
/// in it, and an unplayed result leaves the line's own outcome alone. Lines
/// without a result are copied unchanged.
pub fn attach_outcomes(
    stats: &[ParticipantMatchStat],
    results: &[MatchResult],
) -> Vec<ParticipantMatchStat> {
    let mut by_match: HashMap<&MatchId, &MatchResult> = HashMap::new();
    for result in results {
        by_match.entry(&result.match_id).or_insert(result);
    }

    stats
        .iter()
        .map(|stat| {
            let mut joined = stat.clone();
            if let Some(result) = by_match.get(&stat.match_id) {
                if result.involves(&stat.team_id) {
                    if let Some(won) = result.outcome_for(&stat.team_id) {
                        joined.won = Some(won);
                    }
                }
                if let Some(map_id) = &result.map_id {
                    joined.map_id = Some(map_id.clone());
                }
            }
            joined
        })
        .collect()
}

fn accumulate_player<'a>(
    participant_id: &ParticipantId,
    records: impl Iterator<Item = &'a ParticipantMatchStat>,
) -> PlayerSummary {
    let mut summary = PlayerSummary::empty(participant_id.clone());
    let mut tally = MatchTally::default();

    for stat in records {
        summary.total_kills = summary.total_kills.saturating_add(stat.kills);
        summary.total_deaths = summary.total_deaths.saturating_add(stat.deaths);
        summary.total_assists = summary.total_assists.saturating_add(stat.assists);
        summary.total_spike_plants = summary.total_spike_plants.saturating_add(stat.spike_plants);
        summary.total_spike_defuses = summary
            .total_spike_defuses
            .saturating_add(stat.spike_defuses);
        if stat.first_kill {
            summary.first_kills += 1;
        }
        if stat.is_mvp {
            summary.mvp_count += 1;
        }
        tally.record(stat);
    }

    summary.match_count = tally.matches();
    summary.wins = tally.wins();
    summary.losses = tally.losses();
    summary.with_derived()
}

fn accumulate_team<'a>(
    team_id: &TeamId,
    records: impl Iterator<Item = &'a ParticipantMatchStat>,
) -> TeamSummary {
    let mut summary = TeamSummary::empty(team_id.clone());
    let mut tally = MatchTally::default();
    let mut players: HashSet<&ParticipantId> = HashSet::new();

    for stat in records {
        summary.total_kills = summary.total_kills.saturating_add(stat.kills);
        summary.total_deaths = summary.total_deaths.saturating_add(stat.deaths);
        summary.total_assists = summary.total_assists.saturating_add(stat.assists);
        summary.total_spike_plants = summary.total_spike_plants.saturating_add(stat.spike_plants);
        summary.total_spike_defuses = summary
            .total_spike_defuses
            .saturating_add(stat.spike_defuses);
        if stat.is_mvp {
            summary.mvp_count += 1;
        }
        players.insert(&stat.participant_id);
        tally.record(stat);
    }

    summary.player_count = players.len() as u32;
    summary.match_count = tally.matches();
    summary.wins = tally.wins();
    summary.losses = tally.losses();
    summary.with_derived()
}

/// Summarize one participant over the full record set.
///
/// Records for other participants are ignored. An unknown participant gets
/// an all-zero summary.
pub fn summarize_player(
    stats: &[ParticipantMatchStat],
    participant_id: &ParticipantId,
) -> PlayerSummary {
    accumulate_player(
        participant_id,
        stats.iter().filter(|s| &s.participant_id == participant_id),
    )
}

/// Summarize one team, summing across all of its players.
pub fn summarize_team(stats: &[ParticipantMatchStat], team_id: &TeamId) -> TeamSummary {
    accumulate_team(team_id, stats.iter().filter(|s| &s.team_id == team_id))
}

/// One summary per participant, in order of first appearance.
pub fn summarize_all_players(stats: &[ParticipantMatchStat]) -> Vec<PlayerSummary> {
    let mut groups: Vec<(&ParticipantId, Vec<&ParticipantMatchStat>)> = Vec::new();
    let mut index: HashMap<&ParticipantId, usize> = HashMap::new();

    for stat in stats {
        let slot = *index.entry(&stat.participant_id).or_insert_with(|| {
            groups.push((&stat.participant_id, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(stat);
    }

    groups
        .into_iter()
        .map(|(id, records)| accumulate_player(id, records.into_iter()))
        .collect()
}

/// One summary per team, in order of first appearance.
pub fn summarize_all_teams(stats: &[ParticipantMatchStat]) -> Vec<TeamSummary> {
    let team_ids = deduplicate_by_key(
        &stats.iter().map(|s| s.team_id.clone()).collect::<Vec<_>>(),
        |id| id.clone(),
    );

    team_ids
        .iter()
        .map(|team_id| summarize_team(stats, team_id))
        .collect()
}

/// Headline numbers for a championship.
///
/// Only stat lines from matches whose result belongs to the championship
/// are counted. `average_kda` is the mean of those participants' KDA ratios.
pub fn summarize_championship(
    stats: &[ParticipantMatchStat],
    results: &[MatchResult],
    subscriptions: &[Subscription],
    championship_id: &ChampionshipId,
) -> ChampionshipOverview {
    let matches: HashSet<&MatchId> = results
        .iter()
        .filter(|r| &r.championship_id == championship_id)
        .map(|r| &r.match_id)
        .collect();

    let in_championship: Vec<ParticipantMatchStat> = stats
        .iter()
        .filter(|s| matches.contains(&s.match_id))
        .cloned()
        .collect();

    let total_kills = in_championship
        .iter()
        .fold(0u32, |acc, s| acc.saturating_add(s.kills));
    let total_deaths = in_championship
        .iter()
        .fold(0u32, |acc, s| acc.saturating_add(s.deaths));

    let players = summarize_all_players(&in_championship);
    let average_kda = if players.is_empty() {
        0.0
    } else {
        players.iter().map(|p| p.kda_ratio).sum::<f64>() / players.len() as f64
    };

    ChampionshipOverview {
        championship_id: championship_id.clone(),
        team_count: count_unique_teams_in_championship(subscriptions, championship_id) as u32,
        match_count: matches.len() as u32,
        total_kills,
        total_deaths,
        average_kda,
        computed_at: Utc::now(),
    }
}
