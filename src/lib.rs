//! # Esports Stats
//!
//! Statistics for Valorant tournaments: player, team and championship
//! summaries, per-agent and per-map breakdowns, and leaderboards.
//!
//! ## Architecture
//!
//! - **models**: Raw records (stat lines, match results, subscriptions) and derived summaries
//! - **calculate**: The aggregation and ranking engine (pure functions)
//! - **storage**: JSONL data store
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
