//! Score ledger
//!
//! The running score may be fractional (time survived accrues per tick); the
//! high score is whole points and only moves at the end of a run.

use serde::{Deserialize, Serialize};

use crate::config::ScoringMode;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreState {
    /// Points this run (non-decreasing while playing)
    pub current: f64,
    /// Best finished run
    pub high: u64,
}

impl ScoreState {
    pub fn new(high: u64) -> Self {
        Self { current: 0.0, high }
    }

    pub fn apply_collectible_pickup(&mut self, value: u32) {
        self.current += f64::from(value);
    }

    /// Accrue survival points; no-op under `PickupsOnly`
    pub fn apply_time_survived(&mut self, dt: f32, mode: ScoringMode) {
        if let ScoringMode::PickupsAndTime { points_per_second } = mode {
            self.current += f64::from(points_per_second) * f64::from(dt.max(0.0));
        }
    }

    /// Whole points shown to the player
    pub fn displayed(&self) -> u64 {
        self.current.floor() as u64
    }

    /// Fold the finished run into the high score
    ///
    /// Returns the new high score when it improved (the value to persist).
    pub fn commit_high_score(&mut self) -> Option<u64> {
        let score = self.displayed();
        if score > self.high {
            self.high = score;
            Some(score)
        } else {
            None
        }
    }
}
