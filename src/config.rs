//! Game tuning and variant presets
//!
//! Everything that differs between game variants lives here as data. A config is
//! validated once, up front; the simulation never re-checks it at runtime.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::collision::Aabb;

/// Game variant presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Endless runner: timed fish and spikes, score accrues with time survived
    #[default]
    Runner,
    /// Finite fish row: eat every fish to win
    Collector,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Runner => "Runner",
            Variant::Collector => "Collector",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "runner" | "endless" => Some(Variant::Runner),
            "collector" | "finite" => Some(Variant::Collector),
            _ => None,
        }
    }
}

/// Configuration errors, raised at initialization only
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("world dimensions must be positive (got {width}x{height})")]
    WorldSize { width: f32, height: f32 },
    #[error("gravity must be positive (got {0})")]
    Gravity(f32),
    #[error("jump velocity must point upward (got {0})")]
    JumpVelocity(f32),
    #[error("{what} size must be positive")]
    Size { what: &'static str },
    #[error("player spawn ({x}, {y}) is outside the world")]
    PlayerSpawn { x: f32, y: f32 },
    #[error("{kind} spawn interval is invalid: {reason}")]
    Interval {
        kind: &'static str,
        reason: &'static str,
    },
    #[error("{kind} spawn height {y} is outside 0..={height}")]
    SpawnHeight {
        kind: &'static str,
        y: f32,
        height: f32,
    },
    #[error("{kind} spawn range {min_y}..={max_y} is inverted")]
    SpawnRange {
        kind: &'static str,
        min_y: f32,
        max_y: f32,
    },
    #[error("{kind} bounce must be within 0..=1 (got {bounce})")]
    Bounce { kind: &'static str, bounce: f32 },
    #[error("{kind} speed multiplier must be non-negative (got {value})")]
    SpeedMultiplier { kind: &'static str, value: f32 },
    #[error("world speed is invalid: {0}")]
    WorldSpeed(&'static str),
    #[error("time score rate must be non-negative (got {0})")]
    ScoreRate(f32),
    #[error("win on clear needs a finite collectible row and no collectible timer")]
    WinNeedsFiniteCollectibles,
}

/// World bounds and static geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// Solid ground segments (gaps between them are pits)
    pub grounds: Vec<Aabb>,
    /// Distance past the right edge where entities appear
    pub spawn_margin: f32,
    /// Entities with x below this are removed
    pub cleanup_x: f32,
    /// Entities deeper than `height + cleanup_below` are removed
    pub cleanup_below: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            grounds: vec![Aabb::new(
                Vec2::new(0.0, GROUND_TOP),
                Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
            )],
            spawn_margin: SPAWN_MARGIN,
            cleanup_x: CLEANUP_X,
            cleanup_below: CLEANUP_BELOW,
        }
    }
}

/// Player body and movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub spawn: Vec2,
    pub half_extents: Vec2,
    pub jump_velocity: f32,
    /// Constant horizontal velocity while playing (0 = stand still, the world scrolls)
    pub run_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            half_extents: Vec2::new(PLAYER_HALF_WIDTH, PLAYER_HALF_HEIGHT),
            jump_velocity: JUMP_VELOCITY,
            run_speed: 0.0,
        }
    }
}

/// Shared scroll speed and its ramp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSpeedConfig {
    pub base: f32,
    /// Added every `step_interval` seconds of play
    pub step: f32,
    pub step_interval: f32,
    pub max: f32,
}

impl Default for WorldSpeedConfig {
    fn default() -> Self {
        Self {
            base: 250.0,
            step: 25.0,
            step_interval: 10.0,
            max: 600.0,
        }
    }
}

/// Body and payload of one entity kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityTemplate {
    pub half_extents: Vec2,
    /// Horizontal speed relative to world speed
    pub speed_multiplier: f32,
    pub gravity_enabled: bool,
    /// Restitution against ground (only matters with gravity)
    pub bounce: f32,
    /// Points granted on pickup (collectibles only)
    pub score_value: u32,
}

impl EntityTemplate {
    /// Fish: 0.2 scale star sprite
    pub fn fish() -> Self {
        Self {
            half_extents: Vec2::new(12.0, 12.0),
            speed_multiplier: 0.8,
            gravity_enabled: false,
            bounce: 0.4,
            score_value: 10,
        }
    }

    /// Ice spike: 0.35 scale bomb sprite
    pub fn spike() -> Self {
        Self {
            half_extents: Vec2::new(16.0, 16.0),
            speed_multiplier: 1.0,
            gravity_enabled: false,
            bounce: 0.0,
            score_value: 0,
        }
    }
}

/// Time between spawns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnInterval {
    Fixed { secs: f32 },
    /// Re-rolled uniformly every time the timer re-arms
    Random { min_secs: f32, max_secs: f32 },
}

/// Where a new entity appears vertically
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnPositionPolicy {
    Fixed { y: f32 },
    RandomRange { min_y: f32, max_y: f32 },
    /// Offset from the player's current y
    PlayerRelative { offset_y: f32 },
}

/// A repeating spawn timer for one entity kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnConfig {
    pub interval: SpawnInterval,
    /// Fire on the first playing tick instead of waiting a full interval
    pub fire_immediately: bool,
    pub position: SpawnPositionPolicy,
}

/// A row of collectibles placed when a run starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRow {
    pub count: u32,
    pub start: Vec2,
    pub step_x: f32,
}

/// How score accrues
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScoringMode {
    PickupsOnly,
    PickupsAndTime { points_per_second: f32 },
}

/// What happens when the last collectible is eaten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectiblesClearedPolicy {
    /// End the run as Won (finite mode only)
    Win,
    /// Spawn a one-off hazard immediately and keep going
    SpawnHazard,
    Continue,
}

/// What happens when the player drops below the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FallPolicy {
    /// Falling out counts as a hazard hit
    #[default]
    Lose,
    /// The world's bottom edge acts as a floor
    Clamp,
}

/// Complete game tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub variant: Variant,
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub gravity: f32,
    pub world_speed: WorldSpeedConfig,
    pub collectible: EntityTemplate,
    pub hazard: EntityTemplate,
    pub collectible_spawn: Option<SpawnConfig>,
    pub hazard_spawn: Option<SpawnConfig>,
    pub initial_collectibles: Option<EntityRow>,
    pub scoring: ScoringMode,
    pub on_collectibles_cleared: CollectiblesClearedPolicy,
    #[serde(default)]
    pub fall_policy: FallPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_variant(Variant::default())
    }
}

impl GameConfig {
    /// Build the preset for a variant
    pub fn from_variant(variant: Variant) -> Self {
        match variant {
            Variant::Runner => Self::runner(),
            Variant::Collector => Self::collector(),
        }
    }

    /// Endless runner preset
    pub fn runner() -> Self {
        let spike = EntityTemplate::spike();
        Self {
            variant: Variant::Runner,
            world: WorldConfig::default(),
            player: PlayerConfig::default(),
            gravity: GRAVITY,
            world_speed: WorldSpeedConfig::default(),
            collectible: EntityTemplate::fish(),
            hazard: spike.clone(),
            collectible_spawn: Some(SpawnConfig {
                interval: SpawnInterval::Fixed { secs: 1.2 },
                fire_immediately: false,
                position: SpawnPositionPolicy::RandomRange {
                    min_y: 400.0,
                    max_y: 510.0,
                },
            }),
            hazard_spawn: Some(SpawnConfig {
                interval: SpawnInterval::Random {
                    min_secs: 1.5,
                    max_secs: 3.0,
                },
                fire_immediately: true,
                position: SpawnPositionPolicy::Fixed {
                    y: GROUND_TOP - spike.half_extents.y,
                },
            }),
            initial_collectibles: None,
            scoring: ScoringMode::PickupsAndTime {
                points_per_second: 10.0,
            },
            on_collectibles_cleared: CollectiblesClearedPolicy::Continue,
            fall_policy: FallPolicy::Lose,
        }
    }

    /// Finite fish row preset: eat all five to win
    pub fn collector() -> Self {
        let spike = EntityTemplate::spike();
        Self {
            variant: Variant::Collector,
            world: WorldConfig::default(),
            player: PlayerConfig::default(),
            gravity: GRAVITY,
            world_speed: WorldSpeedConfig {
                base: 200.0,
                step: 10.0,
                step_interval: 15.0,
                max: 300.0,
            },
            collectible: EntityTemplate {
                speed_multiplier: 1.0,
                ..EntityTemplate::fish()
            },
            hazard: EntityTemplate {
                speed_multiplier: 1.25,
                ..spike.clone()
            },
            collectible_spawn: None,
            hazard_spawn: Some(SpawnConfig {
                interval: SpawnInterval::Random {
                    min_secs: 1.5,
                    max_secs: 3.0,
                },
                fire_immediately: true,
                position: SpawnPositionPolicy::Fixed {
                    y: GROUND_TOP - spike.half_extents.y,
                },
            }),
            initial_collectibles: Some(EntityRow {
                count: 5,
                start: Vec2::new(400.0, 420.0),
                step_x: 200.0,
            }),
            scoring: ScoringMode::PickupsOnly,
            on_collectibles_cleared: CollectiblesClearedPolicy::Win,
            fall_policy: FallPolicy::Lose,
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs that would misbehave at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        let world = &self.world;
        if !(world.width > 0.0 && world.height > 0.0) {
            return Err(ConfigError::WorldSize {
                width: world.width,
                height: world.height,
            });
        }
        if !(self.gravity > 0.0) {
            return Err(ConfigError::Gravity(self.gravity));
        }
        if !(self.player.jump_velocity < 0.0) {
            return Err(ConfigError::JumpVelocity(self.player.jump_velocity));
        }
        check_extents("player", self.player.half_extents)?;
        let spawn = self.player.spawn;
        if !(0.0..=world.width).contains(&spawn.x) || !(0.0..=world.height).contains(&spawn.y) {
            return Err(ConfigError::PlayerSpawn {
                x: spawn.x,
                y: spawn.y,
            });
        }
        for ground in &world.grounds {
            check_extents("ground", ground.half_extents())?;
        }

        let speed = &self.world_speed;
        if speed.base < 0.0 || speed.step < 0.0 {
            return Err(ConfigError::WorldSpeed("base and step must be non-negative"));
        }
        if !(speed.step_interval > 0.0) {
            return Err(ConfigError::WorldSpeed("step interval must be positive"));
        }
        if speed.max < speed.base {
            return Err(ConfigError::WorldSpeed("max is below base"));
        }

        check_template("collectible", &self.collectible)?;
        check_template("hazard", &self.hazard)?;
        if let Some(spawn) = &self.collectible_spawn {
            check_spawn("collectible", spawn, world.height)?;
        }
        if let Some(spawn) = &self.hazard_spawn {
            check_spawn("hazard", spawn, world.height)?;
        }

        if let ScoringMode::PickupsAndTime { points_per_second } = self.scoring {
            if !(points_per_second >= 0.0) {
                return Err(ConfigError::ScoreRate(points_per_second));
            }
        }

        if self.on_collectibles_cleared == CollectiblesClearedPolicy::Win {
            let finite_row = self
                .initial_collectibles
                .as_ref()
                .is_some_and(|row| row.count > 0);
            if !finite_row || self.collectible_spawn.is_some() {
                return Err(ConfigError::WinNeedsFiniteCollectibles);
            }
        }

        Ok(())
    }
}

fn check_extents(what: &'static str, half_extents: Vec2) -> Result<(), ConfigError> {
    if half_extents.x > 0.0 && half_extents.y > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Size { what })
    }
}

fn check_template(kind: &'static str, template: &EntityTemplate) -> Result<(), ConfigError> {
    check_extents(kind, template.half_extents)?;
    if !(0.0..=1.0).contains(&template.bounce) {
        return Err(ConfigError::Bounce {
            kind,
            bounce: template.bounce,
        });
    }
    if !(template.speed_multiplier >= 0.0) {
        return Err(ConfigError::SpeedMultiplier {
            kind,
            value: template.speed_multiplier,
        });
    }
    Ok(())
}

fn check_spawn(kind: &'static str, spawn: &SpawnConfig, height: f32) -> Result<(), ConfigError> {
    match spawn.interval {
        SpawnInterval::Fixed { secs } => {
            if !(secs > 0.0) {
                return Err(ConfigError::Interval {
                    kind,
                    reason: "must be positive",
                });
            }
        }
        SpawnInterval::Random { min_secs, max_secs } => {
            if !(min_secs > 0.0) {
                return Err(ConfigError::Interval {
                    kind,
                    reason: "minimum must be positive",
                });
            }
            if max_secs < min_secs {
                return Err(ConfigError::Interval {
                    kind,
                    reason: "maximum is below minimum",
                });
            }
        }
    }

    let in_world = |y: f32| (0.0..=height).contains(&y);
    match spawn.position {
        SpawnPositionPolicy::Fixed { y } => {
            if !in_world(y) {
                return Err(ConfigError::SpawnHeight { kind, y, height });
            }
        }
        SpawnPositionPolicy::RandomRange { min_y, max_y } => {
            if min_y > max_y {
                return Err(ConfigError::SpawnRange { kind, min_y, max_y });
            }
            for y in [min_y, max_y] {
                if !in_world(y) {
                    return Err(ConfigError::SpawnHeight { kind, y, height });
                }
            }
        }
        // Clamped into the world when resolved
        SpawnPositionPolicy::PlayerRelative { .. } => {}
    }
    Ok(())
}
