//! Timed entity spawning
//!
//! Each entity kind has an optional repeating timer. Timers are plain
//! accumulators advanced inside the tick, so spawns are ordinary tick events.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Entity, EntityId, EntityKind, GameEvent, GameSession};
use crate::config::{GameConfig, SpawnConfig, SpawnInterval, SpawnPositionPolicy};

impl SpawnInterval {
    /// Seconds until the next fire
    pub fn roll<R: Rng>(&self, rng: &mut R) -> f32 {
        match *self {
            SpawnInterval::Fixed { secs } => secs,
            SpawnInterval::Random { min_secs, max_secs } => {
                if max_secs > min_secs {
                    rng.random_range(min_secs..=max_secs)
                } else {
                    min_secs
                }
            }
        }
    }
}

impl SpawnPositionPolicy {
    /// Spawn height for a body of half-height `half_height`, kept inside the world
    pub fn resolve<R: Rng>(&self, player_y: f32, world_height: f32, half_height: f32, rng: &mut R) -> f32 {
        let y = match *self {
            SpawnPositionPolicy::Fixed { y } => y,
            SpawnPositionPolicy::RandomRange { min_y, max_y } => {
                if max_y > min_y {
                    rng.random_range(min_y..=max_y)
                } else {
                    min_y
                }
            }
            SpawnPositionPolicy::PlayerRelative { offset_y } => player_y + offset_y,
        };
        let low = half_height.min(world_height / 2.0);
        let high = (world_height - half_height).max(low);
        y.clamp(low, high)
    }
}

/// One repeating timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub interval: SpawnInterval,
    /// Seconds until the next fire
    pub remaining: f32,
}

impl SpawnTimer {
    pub fn arm<R: Rng>(config: &SpawnConfig, rng: &mut R) -> Self {
        let remaining = if config.fire_immediately {
            0.0
        } else {
            config.interval.roll(rng)
        };
        Self {
            interval: config.interval,
            remaining,
        }
    }

    /// Advance by `dt`; returns how many times the timer fired
    pub fn advance<R: Rng>(&mut self, dt: f32, rng: &mut R) -> u32 {
        self.remaining -= dt;
        let mut fires = 0;
        while self.remaining <= 0.0 {
            fires += 1;
            self.remaining += self.interval.roll(rng);
        }
        fires
    }
}

/// Spawns due this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnRequests {
    pub collectibles: u32,
    pub hazards: u32,
    /// Place the configured starting row
    pub opening_row: bool,
}

/// Collectible and hazard timers plus the one-shot opening row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    pub collectible: Option<SpawnTimer>,
    pub hazard: Option<SpawnTimer>,
    opening_row_pending: bool,
}

impl SpawnScheduler {
    pub fn new<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        Self {
            collectible: config
                .collectible_spawn
                .as_ref()
                .map(|spawn| SpawnTimer::arm(spawn, rng)),
            hazard: config
                .hazard_spawn
                .as_ref()
                .map(|spawn| SpawnTimer::arm(spawn, rng)),
            opening_row_pending: config
                .initial_collectibles
                .as_ref()
                .is_some_and(|row| row.count > 0),
        }
    }

    /// Whether more collectibles can still appear this run
    pub fn collectibles_pending(&self) -> bool {
        self.opening_row_pending || self.collectible.is_some()
    }

    pub fn advance<R: Rng>(&mut self, dt: f32, rng: &mut R) -> SpawnRequests {
        let opening_row = std::mem::take(&mut self.opening_row_pending);
        SpawnRequests {
            collectibles: self.collectible.as_mut().map_or(0, |t| t.advance(dt, rng)),
            hazards: self.hazard.as_mut().map_or(0, |t| t.advance(dt, rng)),
            opening_row,
        }
    }
}

/// Create one entity just past the right edge and add it to the session
pub fn spawn_entity(
    session: &mut GameSession,
    config: &GameConfig,
    kind: EntityKind,
    policy: SpawnPositionPolicy,
) -> EntityId {
    let template = match kind {
        EntityKind::Collectible => &config.collectible,
        EntityKind::Hazard => &config.hazard,
    };
    let x = config.world.width + config.world.spawn_margin;
    let y = policy.resolve(
        session.player.pos.y,
        config.world.height,
        template.half_extents.y,
        &mut session.rng,
    );
    place_entity(session, config, kind, Vec2::new(x, y))
}

/// Insert an entity of `kind` at an exact position
pub fn place_entity(
    session: &mut GameSession,
    config: &GameConfig,
    kind: EntityKind,
    pos: Vec2,
) -> EntityId {
    let template = match kind {
        EntityKind::Collectible => &config.collectible,
        EntityKind::Hazard => &config.hazard,
    };
    let id = session.next_entity_id();
    let entity = Entity::from_template(
        id,
        kind,
        template,
        pos,
        session.world_speed.current,
        session.elapsed,
    );
    session.entities.insert(entity);
    session.emit(GameEvent::EntitySpawned { id, kind });
    log::debug!("Spawned {:?} {} at ({:.0}, {:.0})", kind, id, pos.x, pos.y);
    id
}

/// One-off hazard (collectibles-cleared trigger)
pub fn spawn_bonus_hazard(session: &mut GameSession, config: &GameConfig) -> EntityId {
    let policy = config
        .hazard_spawn
        .as_ref()
        .map(|spawn| spawn.position)
        .unwrap_or(SpawnPositionPolicy::PlayerRelative { offset_y: 0.0 });
    spawn_entity(session, config, EntityKind::Hazard, policy)
}

/// Advance the timers and create whatever is due
pub fn run_scheduler(session: &mut GameSession, config: &GameConfig, dt: f32) {
    let requests = session.scheduler.advance(dt, &mut session.rng);

    if requests.opening_row {
        if let Some(row) = &config.initial_collectibles {
            for i in 0..row.count {
                let pos = row.start + Vec2::new(row.step_x * i as f32, 0.0);
                place_entity(session, config, EntityKind::Collectible, pos);
            }
        }
    }
    if let Some(spawn) = &config.collectible_spawn {
        for _ in 0..requests.collectibles {
            spawn_entity(session, config, EntityKind::Collectible, spawn.position);
        }
    }
    if let Some(spawn) = &config.hazard_spawn {
        for _ in 0..requests.hazards {
            spawn_entity(session, config, EntityKind::Hazard, spawn.position);
        }
    }
}
