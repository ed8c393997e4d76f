//! Game state and core simulation types
//!
//! A whole run lives in one `GameSession`; restarting is a single assignment.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::score::ScoreState;
use super::spawn::SpawnScheduler;
use crate::config::{ConfigError, EntityTemplate, GameConfig, PlayerConfig, WorldSpeedConfig};

pub type EntityId = u32;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Every collectible eaten (finite mode)
    Won,
    /// Hit a hazard or fell out of the world
    Lost,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Collectible,
    Hazard,
}

/// Why a run was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    Hazard(EntityId),
    FellOut,
}

/// How the host should tint the player sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlayerTint {
    #[default]
    Normal,
    Hit,
}

/// State changes for the host (UI, audio, effects)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EntitySpawned { id: EntityId, kind: EntityKind },
    EntityDespawned { id: EntityId, kind: EntityKind },
    CollectiblePicked { id: EntityId, points: u32 },
    ScoreChanged { score: u64 },
    WorldSpeedUp { speed: f32 },
    PlayerHit { cause: LossCause },
    RunLost { score: u64, high_score: u64 },
    RunWon { score: u64, high_score: u64 },
    /// Emitted at most once per finished run
    NewHighScore { high_score: u64 },
    Restarted,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Box center
    pub pos: Vec2,
    pub vel: Vec2,
    pub half_extents: Vec2,
    /// True only on ticks where the player rests on a solid surface
    pub grounded: bool,
    pub alive: bool,
    pub tint: PlayerTint,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            pos: config.spawn,
            vel: Vec2::ZERO,
            half_extents: config.half_extents,
            grounded: false,
            alive: true,
            tint: PlayerTint::Normal,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.half_extents)
    }
}

/// A spawned collectible or hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub half_extents: Vec2,
    pub gravity_enabled: bool,
    pub alive: bool,
    pub score_value: u32,
    /// Session clock (seconds) at creation
    pub spawn_time: f32,
    /// Horizontal speed relative to world speed
    pub speed_multiplier: f32,
    pub bounce: f32,
}

impl Entity {
    /// Create an entity streaming left at `world_speed * template.speed_multiplier`
    pub fn from_template(
        id: EntityId,
        kind: EntityKind,
        template: &EntityTemplate,
        pos: Vec2,
        world_speed: f32,
        spawn_time: f32,
    ) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::new(-world_speed * template.speed_multiplier, 0.0),
            half_extents: template.half_extents,
            gravity_enabled: template.gravity_enabled,
            alive: true,
            score_value: match kind {
                EntityKind::Collectible => template.score_value,
                EntityKind::Hazard => 0,
            },
            spawn_time,
            speed_multiplier: template.speed_multiplier,
            bounce: template.bounce,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.half_extents)
    }

    /// Re-sync horizontal velocity with the world speed
    pub fn match_world_speed(&mut self, world_speed: f32) {
        self.vel.x = -world_speed * self.speed_multiplier;
    }
}

/// Live entities keyed by id
///
/// One tagged set: an entity's kind decides which subset it belongs to, so it
/// can never be in both. Iteration is in ascending id order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityCollection {
    entities: BTreeMap<EntityId, Entity>,
}

impl EntityCollection {
    /// Insert an entity; ids are unique
    pub fn insert(&mut self, entity: Entity) {
        let previous = self.entities.insert(entity.id, entity);
        debug_assert!(previous.is_none(), "duplicate entity id");
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    pub fn collectibles(&self) -> impl Iterator<Item = &Entity> {
        self.iter().filter(|e| e.kind == EntityKind::Collectible)
    }

    pub fn hazards(&self) -> impl Iterator<Item = &Entity> {
        self.iter().filter(|e| e.kind == EntityKind::Hazard)
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.iter().filter(|e| e.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Remove every entity matching `remove`, returning the removed ones
    pub fn drain_where(&mut self, mut remove: impl FnMut(&Entity) -> bool) -> Vec<Entity> {
        let ids: Vec<EntityId> = self
            .entities
            .values()
            .filter(|e| remove(e))
            .map(|e| e.id)
            .collect();
        ids.into_iter()
            .filter_map(|id| self.entities.remove(&id))
            .collect()
    }
}

/// Shared scroll speed, stepped up periodically during a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSpeed {
    pub current: f32,
    base: f32,
    step: f32,
    step_interval: f32,
    max: f32,
    since_step: f32,
}

impl WorldSpeed {
    pub fn new(config: &WorldSpeedConfig) -> Self {
        Self {
            current: config.base,
            base: config.base,
            step: config.step,
            step_interval: config.step_interval,
            max: config.max,
            since_step: 0.0,
        }
    }

    pub fn base(&self) -> f32 {
        self.base
    }

    /// Advance the ramp clock; returns true when the speed changed
    pub fn advance(&mut self, dt: f32) -> bool {
        self.since_step += dt;
        let mut changed = false;
        while self.since_step >= self.step_interval {
            self.since_step -= self.step_interval;
            let next = (self.current + self.step).min(self.max);
            if next > self.current {
                self.current = next;
                changed = true;
            }
        }
        changed
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed this run was created with
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds of play this run
    pub elapsed: f32,
    pub player: Player,
    pub entities: EntityCollection,
    pub score: ScoreState,
    pub world_speed: WorldSpeed,
    /// Background scroll distance (pixels), advances at world speed
    pub scroll_offset: f32,
    pub scheduler: SpawnScheduler,
    events: Vec<GameEvent>,
    next_id: EntityId,
}

impl GameSession {
    /// Start a fresh run; `high_score` carries over from earlier runs
    ///
    /// The config is validated here so a bad one never reaches `tick`.
    pub fn new(config: &GameConfig, seed: u64, high_score: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::start(config, seed, high_score))
    }

    fn start(config: &GameConfig, seed: u64, high_score: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let scheduler = SpawnScheduler::new(config, &mut rng);
        Self {
            seed,
            rng,
            phase: GamePhase::Playing,
            time_ticks: 0,
            elapsed: 0.0,
            player: Player::new(&config.player),
            entities: EntityCollection::default(),
            score: ScoreState::new(high_score),
            world_speed: WorldSpeed::new(&config.world_speed),
            scroll_offset: 0.0,
            scheduler,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Replace this run with a fresh one, keeping the high score
    ///
    /// Pending events are kept so the host still sees how the previous run ended.
    pub fn restart(&mut self, config: &GameConfig) {
        let seed = self.rng.random::<u64>();
        let high_score = self.score.high;
        let events = std::mem::take(&mut self.events);
        *self = Self::start(config, seed, high_score);
        self.events = events;
        self.emit(GameEvent::Restarted);
        log::info!("Run restarted (seed {})", seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }
}
