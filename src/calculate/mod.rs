//! Statistics calculation engine.
//!
//! Pure functions over in-memory records:
//! - Player, team and championship summaries
//! - Per-agent and per-map breakdowns
//! - Leaderboard rankings and de-duplication
//!
//! Nothing here performs I/O or mutates its inputs. Dirty numeric input is
//! normalized to zero when records are deserialized, so every function is
//! total.

mod breakdown;
mod rank;
mod summary;

pub use breakdown::{agent_breakdown, map_breakdown};
pub use rank::{
    count_unique_teams_in_championship, deduplicate_by_key, rank_by, rank_players_by_kda,
    rank_players_by_kills, rank_players_by_mvps, rank_teams_by_win_rate,
};
pub use summary::{
    attach_outcomes, summarize_all_players, summarize_all_teams, summarize_championship,
    summarize_player, summarize_team,
};

pub use crate::models::{parse_number, to_number};

/// KDA ratio: `(kills + assists) / deaths`, or `kills + assists` when there
/// are no deaths.
pub fn kda_ratio(kills: u32, deaths: u32, assists: u32) -> f64 {
    let contributions = kills as f64 + assists as f64;
    if deaths == 0 {
        contributions
    } else {
        contributions / deaths as f64
    }
}

/// Win rate as a fraction (0.0 to 1.0), zero when nothing was played.
pub fn win_rate(wins: u32, total_matches: u32) -> f64 {
    if total_matches == 0 {
        0.0
    } else {
        wins as f64 / total_matches as f64
    }
}
