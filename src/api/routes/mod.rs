//! Route handlers, one module per resource.

pub mod championships;
pub mod ingest;
pub mod leaderboards;
pub mod players;
pub mod summaries;
pub mod teams;
