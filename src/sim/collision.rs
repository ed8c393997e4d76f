//! Collision detection and response for axis-aligned boxes
//!
//! Two kinds of contact exist:
//! - Solid: player vs ground segments. Penetration is resolved and the player
//!   becomes grounded when landing from above.
//! - Overlap: player vs entities. Nothing is pushed apart; the overlap only
//!   triggers an effect (pickup or hit).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::score::ScoreState;
use super::state::{Entity, EntityCollection, EntityId, EntityKind, Player};
use crate::config::{FallPolicy, WorldConfig};

/// Slack when deciding whether the player came down onto a surface
const LANDING_TOLERANCE: f32 = 0.5;
/// Bounces slower than this settle onto the ground
const BOUNCE_SETTLE_SPEED: f32 = 20.0;

/// Axis-aligned bounding box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Strict overlap; boxes that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Source of per-tick overlap queries
///
/// Decouples the resolver from how overlaps are found. The default
/// implementation tests boxes directly; a host engine can report its own.
pub trait CollisionSource {
    /// Ids of entities overlapping the player this tick, in ascending id order
    fn overlapping_entities(&self, player: &Player, entities: &EntityCollection) -> Vec<EntityId>;
}

/// Box-vs-box overlap test against every live entity
#[derive(Debug, Clone, Copy, Default)]
pub struct AabbCollisionSource;

impl CollisionSource for AabbCollisionSource {
    fn overlapping_entities(&self, player: &Player, entities: &EntityCollection) -> Vec<EntityId> {
        let body = player.aabb();
        entities
            .iter()
            .filter(|e| e.alive && body.intersects(&e.aabb()))
            .map(|e| e.id)
            .collect()
    }
}

/// Outcome of processing the player's overlaps for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlapReport {
    /// Collectibles eaten, in processing order: (id, points)
    pub picked: Vec<(EntityId, u32)>,
    /// First hazard touched, if any
    pub hazard: Option<EntityId>,
}

/// Apply overlap effects to the collection and score
///
/// Collectibles are removed and scored as they come. The first hazard stops
/// processing; pickups before it keep their points. Ids that are no longer in
/// the collection are ignored.
pub fn resolve_overlaps(
    source: &dyn CollisionSource,
    player: &Player,
    entities: &mut EntityCollection,
    score: &mut ScoreState,
) -> OverlapReport {
    let mut report = OverlapReport::default();

    for id in source.overlapping_entities(player, entities) {
        let Some(kind) = entities.get(id).filter(|e| e.alive).map(|e| e.kind) else {
            continue;
        };
        match kind {
            EntityKind::Collectible => {
                if let Some(mut fish) = entities.remove(id) {
                    fish.alive = false;
                    score.apply_collectible_pickup(fish.score_value);
                    report.picked.push((id, fish.score_value));
                }
            }
            EntityKind::Hazard => {
                report.hazard = Some(id);
                break;
            }
        }
    }

    report
}

/// Resolve player penetration into ground segments
///
/// `prev_bottom`/`prev_top` are the player's box edges before this tick's
/// integration. Landing from above sets `grounded`; hitting a segment from below
/// stops upward motion; anything else is a side hit and pushes out horizontally.
pub fn resolve_player_ground(player: &mut Player, prev_bottom: f32, prev_top: f32, grounds: &[Aabb]) {
    for ground in grounds {
        let body = player.aabb();
        if !body.intersects(ground) {
            continue;
        }

        if prev_bottom <= ground.min.y + LANDING_TOLERANCE && player.vel.y >= 0.0 {
            player.pos.y = ground.min.y - player.half_extents.y;
            player.vel.y = 0.0;
            player.grounded = true;
        } else if prev_top >= ground.max.y - LANDING_TOLERANCE && player.vel.y < 0.0 {
            player.pos.y = ground.max.y + player.half_extents.y;
            player.vel.y = 0.0;
        } else {
            let push_left = body.max.x - ground.min.x;
            let push_right = ground.max.x - body.min.x;
            if push_left < push_right {
                player.pos.x -= push_left;
            } else {
                player.pos.x += push_right;
            }
            player.vel.x = 0.0;
        }
    }
}

/// Keep the player inside the world's sides and ceiling, and apply the fall policy
///
/// Returns true when the player has fallen out of the world and the policy
/// treats that as a loss.
pub fn constrain_player(player: &mut Player, world: &WorldConfig, fall_policy: FallPolicy) -> bool {
    let half = player.half_extents;
    if player.pos.x - half.x < 0.0 {
        player.pos.x = half.x;
        player.vel.x = player.vel.x.max(0.0);
    } else if player.pos.x + half.x > world.width {
        player.pos.x = world.width - half.x;
        player.vel.x = player.vel.x.min(0.0);
    }
    if player.pos.y - half.y < 0.0 {
        player.pos.y = half.y;
        player.vel.y = player.vel.y.max(0.0);
    }

    match fall_policy {
        FallPolicy::Lose => player.pos.y - half.y > world.height,
        FallPolicy::Clamp => {
            if player.pos.y + half.y > world.height {
                player.pos.y = world.height - half.y;
                player.vel.y = player.vel.y.min(0.0);
                player.grounded = true;
            }
            false
        }
    }
}

/// Bounce a falling gravity-enabled entity off the ground
pub fn bounce_on_ground(entity: &mut Entity, grounds: &[Aabb]) {
    if !entity.gravity_enabled || entity.vel.y <= 0.0 {
        return;
    }
    for ground in grounds {
        if !entity.aabb().intersects(ground) {
            continue;
        }
        // Only bounce off the top surface
        if entity.pos.y > ground.min.y {
            continue;
        }
        entity.pos.y = ground.min.y - entity.half_extents.y;
        entity.vel.y = -entity.vel.y * entity.bounce;
        if entity.vel.y.abs() < BOUNCE_SETTLE_SPEED {
            entity.vel.y = 0.0;
        }
        break;
    }
}
