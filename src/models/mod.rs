//! Core data models: raw records, derived summaries and identifiers.

mod ids;
mod match_result;
mod match_stat;
pub mod numeric;
mod stats;

pub use ids::*;
pub use match_result::*;
pub use match_stat::*;
pub use numeric::{parse_number, to_number};
pub use stats::*;
