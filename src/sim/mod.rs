//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod physics;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, AabbCollisionSource, CollisionSource, OverlapReport};
pub use score::ScoreState;
pub use spawn::{SpawnScheduler, SpawnTimer};
pub use state::{
    Entity, EntityCollection, EntityId, EntityKind, GameEvent, GamePhase, GameSession, LossCause,
    Player, PlayerTint, WorldSpeed,
};
pub use tick::{TickInput, cleanup_sweep, tick, tick_with_source};
