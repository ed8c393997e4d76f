//! Game driver
//!
//! Owns the session, its config and the high score store. The host calls
//! `update` once per rendered frame; the driver runs fixed simulation steps and
//! saves the high score when a finished run beats it. The save happens once the
//! frame's steps are done, never inside a step.

use crate::config::{ConfigError, GameConfig};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScore;
use crate::hud::HudSnapshot;
use crate::persistence::KeyValueStore;
use crate::sim::{GameEvent, GameSession, TickInput, tick};

/// Longest frame we simulate; anything slower is treated as a hitch
const MAX_FRAME_DT: f32 = 0.1;

pub struct Game<S: KeyValueStore> {
    config: GameConfig,
    session: GameSession,
    store: S,
    high_score: HighScore,
    accumulator: f32,
    /// Restart pressed on a frame too short to tick; applied on the next tick
    pending_restart: bool,
    /// New best waiting to be written to the store
    unsaved_high_score: Option<u64>,
}

impl<S: KeyValueStore> Game<S> {
    /// Validate the config, load the high score and start the first run
    pub fn new(config: GameConfig, store: S, seed: u64) -> Result<Self, ConfigError> {
        let high_score = HighScore::load(&store);
        let session = GameSession::new(&config, seed, high_score.best)?;
        log::info!(
            "Starting {} run (seed {}, best {})",
            config.variant.as_str(),
            seed,
            high_score.best
        );
        Ok(Self {
            config,
            session,
            store,
            high_score,
            accumulator: 0.0,
            pending_restart: false,
            unsaved_high_score: None,
        })
    }

    /// Run as many fixed steps as `frame_dt` covers
    pub fn update(&mut self, frame_dt: f32, input: &TickInput) -> Vec<GameEvent> {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.pending_restart |= input.restart;
        // Restart is one-shot; it rides on the next step via `pending_restart`
        let input = TickInput {
            restart: false,
            ..input.clone()
        };

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(self.advance(&input, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        self.flush_high_score();
        events
    }

    /// Run exactly one step with a host-supplied `dt`
    pub fn step(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        let events = self.advance(input, dt);
        self.flush_high_score();
        events
    }

    fn advance(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        let pending = std::mem::take(&mut self.pending_restart);
        let input = TickInput {
            restart: input.restart || pending,
            ..input.clone()
        };
        tick(&mut self.session, &self.config, &input, dt);

        let events = self.session.drain_events();
        for event in &events {
            if let GameEvent::NewHighScore { high_score } = *event {
                if self.high_score.record(high_score) {
                    self.unsaved_high_score = Some(high_score);
                }
            }
        }
        events
    }

    /// Fire-and-forget save; a failure leaves the in-memory best untouched
    fn flush_high_score(&mut self) {
        let Some(score) = self.unsaved_high_score.take() else {
            return;
        };
        if let Err(e) = self.high_score.save(&mut self.store) {
            log::warn!("Could not save high score {}: {}", score, e);
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::from_session(&self.session)
    }
}
