//! Penguin Run - a side-scrolling obstacle runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game state)
//! - `config`: Data-driven tuning with variant presets
//! - `game`: Fixed-timestep driver that owns the session and the high score store
//! - `persistence`: Key-value storage backends
//! - `platform`: Input edge detection
//! - `hud`: Text and tint state for the host renderer

pub mod config;
pub mod game;
pub mod highscores;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod sim;

pub use config::{ConfigError, GameConfig, Variant};
pub use game::Game;
pub use highscores::HighScore;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World dimensions (pixels, y grows downward)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    /// Top edge of the default ground strip
    pub const GROUND_TOP: f32 = 536.0;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 900.0;
    /// Vertical velocity applied on jump (negative = up)
    pub const JUMP_VELOCITY: f32 = -460.0;

    /// Player spawn point and body half-size (80x150 body at 0.25 scale)
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y: f32 = 460.0;
    pub const PLAYER_HALF_WIDTH: f32 = 10.0;
    pub const PLAYER_HALF_HEIGHT: f32 = 18.75;

    /// Entities spawn this far past the right edge
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Entities left of this x are swept
    pub const CLEANUP_X: f32 = -80.0;
    /// Entities this far below the world are swept
    pub const CLEANUP_BELOW: f32 = 100.0;
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Penguin Run (web) starting...");
}
