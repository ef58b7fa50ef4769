//! The full raw record set, loaded from JSONL.

use std::collections::HashSet;

use tracing::debug;

use super::{EntityType, JsonlReader, StorageConfig, StorageError};
use crate::calculate::{attach_outcomes, deduplicate_by_key};
use crate::models::{ChampionshipId, MatchId, MatchResult, ParticipantMatchStat, Subscription};

/// Every stored record, with stat lines already joined to their results.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub stats: Vec<ParticipantMatchStat>,
    pub results: Vec<MatchResult>,
    pub subscriptions: Vec<Subscription>,
}

impl Dataset {
    /// Build a dataset from raw records.
    ///
    /// A stat line recorded twice for the same participant and match keeps
    /// its first occurrence, as does a match with two results.
    pub fn new(
        stats: Vec<ParticipantMatchStat>,
        results: Vec<MatchResult>,
        subscriptions: Vec<Subscription>,
    ) -> Self {
        let stats = deduplicate_by_key(&stats, |s| s.record_key());
        let results = deduplicate_by_key(&results, |r| r.match_id.clone());
        let stats = attach_outcomes(&stats, &results);

        Self {
            stats,
            results,
            subscriptions,
        }
    }

    /// Read all three entity files.
    pub fn load(config: &StorageConfig) -> Result<Self, StorageError> {
        let stats = JsonlReader::<ParticipantMatchStat>::for_entity(config, EntityType::MatchStat)
            .read_all()?;
        let results =
            JsonlReader::<MatchResult>::for_entity(config, EntityType::MatchResult).read_all()?;
        let subscriptions =
            JsonlReader::<Subscription>::for_entity(config, EntityType::Subscription)
                .read_all()?;

        debug!(
            "Loaded {} stat lines, {} results, {} subscriptions",
            stats.len(),
            results.len(),
            subscriptions.len()
        );

        Ok(Self::new(stats, results, subscriptions))
    }

    /// Stat lines from matches played in `championship_id`.
    pub fn stats_in_championship(
        &self,
        championship_id: &ChampionshipId,
    ) -> Vec<ParticipantMatchStat> {
        let matches: HashSet<&MatchId> = self
            .results
            .iter()
            .filter(|r| &r.championship_id == championship_id)
            .map(|r| &r.match_id)
            .collect();

        self.stats
            .iter()
            .filter(|s| matches.contains(&s.match_id))
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty() && self.results.is_empty() && self.subscriptions.is_empty()
    }
}
