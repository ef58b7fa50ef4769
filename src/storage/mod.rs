//! Filesystem data store.
//!
//! Raw records live as JSONL under `<data_dir>/normalized/`. Summaries are
//! never written; they are recomputed from the loaded [`Dataset`].

mod dataset;
mod jsonl;

pub use dataset::Dataset;
pub use jsonl::{entity_path, EntityType, JsonlReader, JsonlWriter};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn normalized_dir(&self) -> PathBuf {
        self.data_dir.join("normalized")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));
        assert_eq!(config.normalized_dir(), PathBuf::from("/data/normalized"));
        assert_eq!(
            entity_path(&config, EntityType::MatchStat),
            PathBuf::from("/data/normalized/match_stats.jsonl")
        );
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }
}
