//! High score record
//!
//! A single best score is persisted through a `ScoreStore`. Loading never
//! fails from the caller's point of view: missing or corrupt data reads as 0.

use serde::{Deserialize, Serialize};

use crate::persistence::{PersistenceError, ScoreStore};

/// Storage key / file stem for the record
pub const STORAGE_KEY: &str = "tile_dash_high_score";

/// The persisted record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    /// Best score ever reached
    #[serde(default)]
    pub score: u64,
    /// Unix timestamp (ms) when it was reached
    #[serde(default)]
    pub timestamp: f64,
}

impl HighScoreRecord {
    fn read(store: &dyn ScoreStore) -> Result<Option<Self>, PersistenceError> {
        match store.read()? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn write(&self, store: &mut dyn ScoreStore) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(self)?;
        store.write(&json)
    }
}

/// Load the best score, 0 when absent or unreadable
pub fn load_high_score(store: &dyn ScoreStore) -> u64 {
    match HighScoreRecord::read(store) {
        Ok(Some(record)) => {
            log::info!("Loaded high score {}", record.score);
            record.score
        }
        Ok(None) => {
            log::info!("No high score found, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("Failed to load high score: {}", e);
            0
        }
    }
}

/// Persist the best score; failures are logged and dropped
pub fn save_high_score(store: &mut dyn ScoreStore, score: u64, timestamp: f64) {
    let record = HighScoreRecord { score, timestamp };
    match record.write(store) {
        Ok(()) => log::debug!("High score saved ({})", score),
        Err(e) => log::warn!("Failed to save high score: {}", e),
    }
}
