//! Body integration
//!
//! Semi-implicit Euler: velocity picks up gravity first, then moves the body.

use glam::Vec2;

use super::state::{Entity, Player};

/// Advance one body by `dt`
#[inline]
pub fn integrate(pos: &mut Vec2, vel: &mut Vec2, gravity_enabled: bool, gravity: f32, dt: f32) {
    if gravity_enabled {
        vel.y += gravity * dt;
    }
    *pos += *vel * dt;
}

/// Integrate the player; grounded is re-established by collision afterwards
pub fn step_player(player: &mut Player, gravity: f32, dt: f32) {
    player.grounded = false;
    integrate(&mut player.pos, &mut player.vel, true, gravity, dt);
}

pub fn step_entity(entity: &mut Entity, gravity: f32, dt: f32) {
    integrate(&mut entity.pos, &mut entity.vel, entity.gravity_enabled, gravity, dt);
}
