//! Persistent high score
//!
//! Stored as a decimal string under a fixed key. Storage problems never stop the
//! game: loading falls back to zero and a failed save keeps the in-memory value.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StoreError};

/// Best finished-run score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "penguin_run_high_score";

    pub fn new() -> Self {
        Self { best: 0 }
    }

    /// Record a finished run's score; returns true if it is a new best
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load from a store, starting fresh on any problem
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(value)) => match value.trim().parse::<u64>() {
                Ok(best) => {
                    log::info!("Loaded high score {}", best);
                    Self { best }
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable high score {:?}: {}", value, e);
                    Self::new()
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("High score storage unavailable: {}", e);
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        store.set(Self::STORAGE_KEY, &self.best.to_string())?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}
