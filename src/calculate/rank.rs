//! Leaderboards, team counts and de-duplication.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

use crate::models::{ChampionshipId, PlayerSummary, Subscription, TeamSummary};

/// Sort a copy of `items` by `metric`, highest first, and keep the top `limit`.
///
/// The sort is stable, so entries with equal metrics keep their input
/// order. Non-finite metrics rank as zero.
pub fn rank_by<T, F>(items: &[T], metric: F, limit: Option<usize>) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    let score = |item: &T| {
        let value = metric(item);
        if value.is_finite() {
            value
        } else {
            0.0
        }
    };

    let mut ranked = items.to_vec();
    ranked.sort_by(|a, b| score(b).partial_cmp(&score(a)).unwrap_or(Ordering::Equal));
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

/// Players ordered by KDA ratio, best first.
pub fn rank_players_by_kda(
    summaries: &[PlayerSummary],
    limit: Option<usize>,
) -> Vec<PlayerSummary> {
    rank_by(summaries, |s| s.kda_ratio, limit)
}

/// Players ordered by total kills.
pub fn rank_players_by_kills(
    summaries: &[PlayerSummary],
    limit: Option<usize>,
) -> Vec<PlayerSummary> {
    rank_by(summaries, |s| s.total_kills as f64, limit)
}

/// Players ordered by MVP awards.
pub fn rank_players_by_mvps(
    summaries: &[PlayerSummary],
    limit: Option<usize>,
) -> Vec<PlayerSummary> {
    rank_by(summaries, |s| s.mvp_count as f64, limit)
}

/// Teams ordered by win rate, best first.
pub fn rank_teams_by_win_rate(summaries: &[TeamSummary], limit: Option<usize>) -> Vec<TeamSummary> {
    rank_by(summaries, |s| s.win_rate, limit)
}

/// Number of distinct teams subscribed to a championship.
pub fn count_unique_teams_in_championship(
    subscriptions: &[Subscription],
    championship_id: &ChampionshipId,
) -> usize {
    subscriptions
        .iter()
        .filter(|s| &s.championship_id == championship_id)
        .map(|s| &s.team_id)
        .collect::<HashSet<_>>()
        .len()
}

/// Keep the first item for each key, in input order.
pub fn deduplicate_by_key<T, K, F>(items: &[T], key_fn: F) -> Vec<T>
where
    T: Clone,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(key_fn(*item)))
        .cloned()
        .collect()
}
