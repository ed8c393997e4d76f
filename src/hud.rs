//! HUD state for the host renderer
//!
//! The core only decides what to show; fonts and layout belong to the host.

use crate::sim::{GamePhase, GameSession, PlayerTint};

/// Everything the HUD displays for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudSnapshot {
    pub score_text: String,
    pub high_score_text: String,
    /// Game over / win message, only while the run is finished
    pub banner: Option<String>,
    pub player_tint: PlayerTint,
}

impl HudSnapshot {
    pub fn from_session(session: &GameSession) -> Self {
        let banner = match session.phase {
            GamePhase::Playing => None,
            GamePhase::Lost => Some("Game Over! Press R to restart".to_string()),
            GamePhase::Won => Some("You Win! Press R to play again".to_string()),
        };
        Self {
            score_text: format!("Score: {}", session.score.displayed()),
            high_score_text: format!("Best: {}", session.score.high),
            banner,
            player_tint: session.player.tint,
        }
    }
}
