//! Per-agent and per-map breakdowns for a single participant.

use std::collections::HashMap;
use std::hash::Hash;

use crate::models::{
    AgentStatistic, BreakdownRecord, MapStatistic, ParticipantId, ParticipantMatchStat,
};

use super::summary::MatchTally;

/// Group a participant's lines by `key`, preserving first-seen order, and
/// reduce each group to a [`BreakdownRecord`]. Lines with no key are skipped.
/// Output is ordered by games played, most first.
fn breakdown_by<'a, K, F>(
    stats: &'a [ParticipantMatchStat],
    participant_id: &ParticipantId,
    key: F,
) -> Vec<(K, BreakdownRecord)>
where
    K: Eq + Hash + Clone,
    F: Fn(&'a ParticipantMatchStat) -> Option<K>,
{
    let mut groups: Vec<(K, BreakdownRecord, MatchTally<'a>)> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for stat in stats.iter().filter(|s| &s.participant_id == participant_id) {
        let Some(k) = key(stat) else {
            continue;
        };
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            groups.push((k, BreakdownRecord::default(), MatchTally::default()));
            groups.len() - 1
        });

        let (_, record, tally) = &mut groups[slot];
        record.kills = record.kills.saturating_add(stat.kills);
        record.deaths = record.deaths.saturating_add(stat.deaths);
        record.assists = record.assists.saturating_add(stat.assists);
        tally.record(stat);
    }

    let mut rows: Vec<(K, BreakdownRecord)> = groups
        .into_iter()
        .map(|(k, mut record, tally)| {
            record.games_played = tally.matches();
            record.wins = tally.wins();
            record.losses = tally.losses();
            (k, record.with_derived())
        })
        .collect();

    // Stable: equal game counts keep first-seen order
    rows.sort_by(|a, b| b.1.games_played.cmp(&a.1.games_played));
    rows
}

/// How a participant performs on each agent they played.
pub fn agent_breakdown(
    stats: &[ParticipantMatchStat],
    participant_id: &ParticipantId,
) -> Vec<AgentStatistic> {
    breakdown_by(stats, participant_id, |s| Some(s.agent_id.clone()))
        .into_iter()
        .map(|(agent_id, record)| AgentStatistic {
            participant_id: participant_id.clone(),
            agent_id,
            record,
        })
        .collect()
}

/// How a participant performs on each map. Lines without a known map are
/// left out.
pub fn map_breakdown(
    stats: &[ParticipantMatchStat],
    participant_id: &ParticipantId,
) -> Vec<MapStatistic> {
    breakdown_by(stats, participant_id, |s| s.map_id.clone())
        .into_iter()
        .map(|(map_id, record)| MapStatistic {
            participant_id: participant_id.clone(),
            map_id,
            record,
        })
        .collect()
}
