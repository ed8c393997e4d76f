//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically. While the run is
//! Won or Lost nothing moves; only a restart request is honoured.

use super::collision::{self, AabbCollisionSource, CollisionSource};
use super::physics;
use super::spawn;
use super::state::{EntityKind, GameEvent, GamePhase, GameSession, LossCause, PlayerTint};
use crate::config::{CollectiblesClearedPolicy, GameConfig};

/// Seconds of look-ahead the idle autopilot uses when deciding to jump
const AUTOPILOT_REACTION_SECS: f32 = 0.3;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump key held
    pub jump: bool,
    /// Restart key went down this tick (edge-triggered)
    pub restart: bool,
    /// Idle/demo mode - autopilot jumps over spikes
    pub idle_mode: bool,
}

/// Advance the session by one timestep using box overlap tests
pub fn tick(session: &mut GameSession, config: &GameConfig, input: &TickInput, dt: f32) {
    tick_with_source(session, config, &AabbCollisionSource, input, dt);
}

/// Advance the session by one timestep with a custom overlap source
pub fn tick_with_source(
    session: &mut GameSession,
    config: &GameConfig,
    source: &dyn CollisionSource,
    input: &TickInput,
    dt: f32,
) {
    if session.is_terminal() {
        if input.restart {
            session.restart(config);
        }
        return;
    }

    let mut input = input.clone();
    if input.idle_mode {
        input.jump = autopilot_wants_jump(session);
    }

    session.time_ticks += 1;
    session.elapsed += dt;

    // --- PHYSICS ---
    let before = session.player.aabb();
    physics::step_player(&mut session.player, config.gravity, dt);
    for entity in session.entities.iter_mut() {
        physics::step_entity(entity, config.gravity, dt);
        collision::bounce_on_ground(entity, &config.world.grounds);
    }

    // --- SOLID COLLISION ---
    collision::resolve_player_ground(
        &mut session.player,
        before.max.y,
        before.min.y,
        &config.world.grounds,
    );
    let fell_out =
        collision::constrain_player(&mut session.player, &config.world, config.fall_policy);

    // --- OVERLAPS ---
    let report = collision::resolve_overlaps(
        source,
        &session.player,
        &mut session.entities,
        &mut session.score,
    );
    for &(id, points) in &report.picked {
        session.emit(GameEvent::CollectiblePicked { id, points });
        session.emit(GameEvent::EntityDespawned {
            id,
            kind: EntityKind::Collectible,
        });
    }
    if !report.picked.is_empty() {
        let score = session.score.displayed();
        session.emit(GameEvent::ScoreChanged { score });
    }

    if let Some(id) = report.hazard {
        end_run(session, GamePhase::Lost, Some(LossCause::Hazard(id)));
        return;
    }
    if fell_out {
        end_run(session, GamePhase::Lost, Some(LossCause::FellOut));
        return;
    }

    if apply_cleared_policy(session, config, !report.picked.is_empty()) {
        return;
    }

    // --- PLAYER INPUT ---
    let player = &mut session.player;
    player.vel.x = config.player.run_speed;
    if input.jump && player.grounded {
        player.vel.y = config.player.jump_velocity;
        player.grounded = false;
    }

    // --- SCORE ---
    let shown_before = session.score.displayed();
    session.score.apply_time_survived(dt, config.scoring);
    let shown_after = session.score.displayed();
    if shown_after != shown_before {
        session.emit(GameEvent::ScoreChanged { score: shown_after });
    }

    // --- WORLD SPEED ---
    if session.world_speed.advance(dt) {
        let speed = session.world_speed.current;
        for entity in session.entities.iter_mut() {
            entity.match_world_speed(speed);
        }
        session.emit(GameEvent::WorldSpeedUp { speed });
        log::info!("World speed up: {:.0}", speed);
    }
    session.scroll_offset += session.world_speed.current * dt;

    // --- SPAWNING ---
    spawn::run_scheduler(session, config, dt);

    // --- CLEANUP ---
    cleanup_sweep(session, config);

    // Collectibles that scrolled away uncollected still count as cleared
    apply_cleared_policy(session, config, false);
}

/// React to an empty collectible set; returns true if the run ended
///
/// `Win` only needs the set empty with nothing left to spawn. The bonus hazard
/// is a reward for a pickup, so it needs `picked`.
fn apply_cleared_policy(session: &mut GameSession, config: &GameConfig, picked: bool) -> bool {
    if session.entities.count(EntityKind::Collectible) != 0 {
        return false;
    }
    match config.on_collectibles_cleared {
        CollectiblesClearedPolicy::Win if !session.scheduler.collectibles_pending() => {
            end_run(session, GamePhase::Won, None);
            true
        }
        CollectiblesClearedPolicy::SpawnHazard if picked => {
            let id = spawn::spawn_bonus_hazard(session, config);
            log::info!("Collectibles cleared, bonus hazard {}", id);
            false
        }
        _ => false,
    }
}

/// Remove entities that left the screen on the left or dropped below the world
pub fn cleanup_sweep(session: &mut GameSession, config: &GameConfig) {
    let world = &config.world;
    let floor = world.height + world.cleanup_below;
    let removed = session
        .entities
        .drain_where(|e| e.pos.x < world.cleanup_x || e.pos.y > floor);
    for mut entity in removed {
        entity.alive = false;
        session.emit(GameEvent::EntityDespawned {
            id: entity.id,
            kind: entity.kind,
        });
    }
}

/// Move the session into a terminal phase and settle the score
fn end_run(session: &mut GameSession, phase: GamePhase, cause: Option<LossCause>) {
    session.phase = phase;
    session.player.vel.x = 0.0;

    if let Some(cause) = cause {
        session.player.alive = false;
        session.player.tint = PlayerTint::Hit;
        session.emit(GameEvent::PlayerHit { cause });
    }

    let new_high = session.score.commit_high_score();
    let score = session.score.displayed();
    let high_score = session.score.high;
    match phase {
        GamePhase::Won => {
            log::info!("Run won with {} points (best {})", score, high_score);
            session.emit(GameEvent::RunWon { score, high_score });
        }
        _ => {
            log::info!("Run lost with {} points (best {})", score, high_score);
            session.emit(GameEvent::RunLost { score, high_score });
        }
    }
    if let Some(high_score) = new_high {
        session.emit(GameEvent::NewHighScore { high_score });
    }
}

/// Jump when a hazard at player height is about to reach the player
fn autopilot_wants_jump(session: &GameSession) -> bool {
    let player = &session.player;
    if !player.grounded {
        return false;
    }
    let body = player.aabb();
    let reach = session.world_speed.current * AUTOPILOT_REACTION_SECS;
    session.entities.hazards().any(|hazard| {
        let bounds = hazard.aabb();
        let ahead = bounds.min.x - body.max.x;
        let same_height = bounds.min.y < body.max.y && bounds.max.y > body.min.y;
        same_height && ahead >= 0.0 && ahead <= reach
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EntityTemplate, SpawnConfig, SpawnInterval, SpawnPositionPolicy};
    use crate::consts::*;
    use crate::sim::collision::Aabb;
    use crate::sim::state::{Entity, EntityId, Player};
    use crate::sim::EntityCollection;
    use glam::Vec2;

    /// Runner with no timed spawns, so tests control every entity
    fn quiet_runner() -> GameConfig {
        let mut config = GameConfig::runner();
        config.collectible_spawn = None;
        config.hazard_spawn = None;
        config.scoring = crate::config::ScoringMode::PickupsOnly;
        config
    }

    fn settle(session: &mut GameSession, config: &GameConfig) {
        for _ in 0..120 {
            tick(session, config, &TickInput::default(), SIM_DT);
        }
        assert!(session.player.grounded);
    }

    fn put(session: &mut GameSession, config: &GameConfig, kind: EntityKind, pos: Vec2) -> EntityId {
        spawn::place_entity(session, config, kind, pos)
    }

    fn restart_input() -> TickInput {
        TickInput {
            restart: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_player_lands_and_rests_on_ground() {
        let config = quiet_runner();
        let mut session = GameSession::new(&config, 1, 0).unwrap();
        settle(&mut session, &config);
        assert_eq!(session.player.aabb().max.y, GROUND_TOP);
        assert_eq!(session.player.vel.y, 0.0);
        assert_eq!(session.phase, GamePhase::Playing);
    }

    #[test]
    fn test_gravity_monotonic_while_airborne() {
        let config = quiet_runner();
        let mut session = GameSession::new(&config, 1, 0).unwrap();
        session.player.pos.y = 100.0;
        let mut last_vy = session.player.vel.y;
        for _ in 0..30 {
            tick(&mut session, &config, &TickInput::default(), SIM_DT);
            assert!(session.player.vel.y > last_vy);
            assert!(!session.player.grounded);
            last_vy = session.player.vel.y;
        }
    }

    #[test]
    fn test_jump_from_ground() {
        let config = quiet_runner();
        let mut session = GameSession::new(&config, 1, 0).unwrap();
        settle(&mut session, &config);

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut session, &config, &jump, SIM_DT);
        assert_eq!(session.player.vel.y, JUMP_VELOCITY);
        assert!(!session.player.grounded);

        // Airborne until the player comes back down
        let mut ticks = 0;
        while !session.player.grounded {
            tick(&mut session, &config, &TickInput::default(), SIM_DT);
            ticks += 1;
            assert!(ticks < 240, "player never landed");
        }
        assert!(ticks > 30);
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let config = quiet_runner();
        let mut session = GameSession::new(&config, 1, 0).unwrap();
        session.player.pos.y = 100.0;
        tick(&mut session, &config, &TickInput::default(), SIM_DT);
        let vy = session.player.vel.y;

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut session, &config, &jump, SIM_DT);
        assert!((session.player.vel.y - (vy + GRAVITY * SIM_DT)).abs() < 0.001);
    }

    #[test]
    fn test_hazard_overlap_loses_and_updates_high_score() {
        let config = quiet_runner();
        let mut session = GameSession::new(&config, 1, 20).unwrap();
        settle(&mut session, &config);
        session.score.current = 35.0;
        session.drain_events();

        let pos = session.player.pos;
        let id = put(&mut session, &config, EntityKind::Hazard, pos);
        tick(&mut session, &config, &TickInput::default(), SIM_DT);

        assert_eq!(session.phase, GamePhase::Lost);
        assert!(!session.player.alive);
        assert_eq!(session.player.tint, PlayerTint::Hit);
        assert_eq!(session.score.high, 35);
        let events = session.drain_events();
        assert!(events.contains(&GameEvent::PlayerHit {
            cause: LossCause::Hazard(id)
        }));
        assert!(events.contains(&GameEvent::NewHighScore { high_score: 35 }));

        // Frozen: nothing moves and score stays put
        let frozen_y = session.player.pos.y;
        for _ in 0..10 {
            tick(&mut session, &config, &TickInput::default(), SIM_DT);
        }
        assert_eq!(session.player.pos.y, frozen_y);
        assert_eq!(session.score.displayed(), 35);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_lower_score_keeps_high_score() {
        let config = quiet_runner();
        let mut session = GameSession::new(&config, 1, 150).unwrap();
        settle(&mut session, &config);
        session.score.current = 40.0;
        let pos = session.player.pos;
        put(&mut session, &config, EntityKind::Hazard, pos);
        tick(&mut session, &config, &TickInput::default(), SIM_DT);

        assert_eq!(session.phase, GamePhase::Lost);
        assert_eq!(session.score.high, 150);
        assert!(
            !session
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::NewHighScore { .. }))
        );
    }

    #[test]
    fn test_time_score_stops_after_loss() {
        let mut config = quiet_runner();
        config.scoring = crate::config::ScoringMode::PickupsAndTime {
            points_per_second: 60.0,
        };
        let mut session = GameSession::new(&config, 1, 0).unwrap();
        settle(&mut session, &config);
        let before = session.score.current;
        assert!(before > 0.0);

        let pos = session.player.pos;
        put(&mut session, &config, EntityKind::Hazard, pos);
        tick(&mut session, &config, &TickInput::default(), SIM_DT);
        let at_loss = session.score.current;
        assert_eq!(at_loss, before);
        tick(&mut session, &config, &TickInput::default(), SIM_DT);
        assert_eq!(session.score.current, at_loss);
    }

    #[test]
    fn test_falling_into_gap_loses() {
        let mut config = quiet_runner();
        // Pit under the spawn point
        config.world.grounds = vec![Aabb::new(
            Vec2::new(300.0, GROUND_TOP),
            Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
        )];
        let mut session = GameSession::new(&config, 1, 0).unwrap();
        for _ in 0..240 {
            tick(&mut session, &config, &TickInput::default(), SIM_DT);
            if session.is_terminal() {
                break;
            }
        }
        assert_eq!(session.phase, GamePhase::Lost);
        assert!(
            session
                .drain_events()
                .contains(&GameEvent::PlayerHit {
                    cause: LossCause::FellOut
                })
        );
    }

    #[test]
    fn test_fall_clamp_policy_survives_gap() {
        let mut config = quiet_runner();
        config.world.grounds.clear();
        config.fall_policy = crate::config::FallPolicy::Clamp;
        let mut session = GameSession::new(&config, 1, 0).unwrap();
        for _ in 0..240 {
            tick(&mut session, &config, &TickInput::default(), SIM_DT);
        }
        assert_eq!(session.phase, GamePhase::Playing);
        assert!(session.player.grounded);
        assert_eq!(session.player.aabb().max.y, WORLD_HEIGHT);
    }

    #[test]
    fn test_collect_all_fish_wins() {
        let mut config = GameConfig::collector();
        config.hazard_spawn = None;
        config.collectible.score_value = 20;
        let mut session = GameSession::new(&config, 1, 0).unwrap();
        settle(&mut session, &config);
        assert_eq!(session.entities.count(EntityKind::Collectible), 5);

        let ids: Vec<EntityId> = session.entities.collectibles().map(|e| e.id).collect();
        for (n, id) in ids.into_iter().enumerate() {
            assert_eq!(session.phase, GamePhase::Playing);
            let player_pos = session.player.pos;
            let fish = session.entities.remove(id).unwrap();
            session.entities.insert(Entity { pos: player_pos, ..fish });
            tick(&mut session, &config, &TickInput::default(), SIM_DT);
            assert!(!session.entities.contains(id));
            assert_eq!(session.score.displayed(), 20 * (n as u64 + 1));
        }
        assert_eq!(session.phase, GamePhase::Won);
        assert!(session.player.alive);
        assert_eq!(session.score.high, 100);
        assert!(
            session
                .drain_events()
                .contains(&GameEvent::RunWon {
                    score: 100,
                    high_score: 100
                })
        );
    }

    #[test]
    fn test_uncollected_row_scrolling_away_wins() {
        let mut config = GameConfig::collector();
        config.hazard_spawn = None;
        let mut session = GameSession::new(&config, 1, 0).unwrap();
        let mut ticks = 0;
        while !session.is_terminal() {
            tick(&mut session, &config, &TickInput::default(), SIM_DT);
            ticks += 1;
            assert!(ticks < 60 * 30, "run never finished");
        }
        assert_eq!(session.phase, GamePhase::Won);
        assert!(session.entities.collectibles().next().is_none());
        assert_eq!(session.score.displayed(), 0);
        assert!(
            session
                .drain_events()
                .contains(&GameEvent::RunWon {
                    score: 0,
                    high_score: 0
                })
        );
    }

    #[test]
    fn test_hazard_beats_cleared_row() {
        let mut config = GameConfig::collector();
        config.hazard_spawn = None;
        let mut session = GameSession::new(&config, 1, 0).unwrap();
        settle(&mut session, &config);
        let ids: Vec<EntityId> = session.entities.collectibles().map(|e| e.id).collect();
        for id in ids {
            session.entities.remove(id);
        }
        let pos = session.player.pos;
        put(&mut session, &config, EntityKind::Hazard, pos);
        tick(&mut session, &config, &TickInput::default(), SIM_DT);
        assert_eq!(session.phase, GamePhase::Lost);
    }

    #[test]
    fn test_cleared_policy_spawns_bonus_hazard() {
        let mut config = quiet_runner();
        config.on_collectibles_cleared = CollectiblesClearedPolicy::SpawnHazard;
        config.hazard_spawn = Some(SpawnConfig {
            interval: SpawnInterval::Fixed { secs: 100.0 },
            fire_immediately: false,
            position: SpawnPositionPolicy::Fixed { y: 520.0 },
        });
        let mut session = GameSession::new(&config, 1, 0).unwrap();
        settle(&mut session, &config);
        let pos = session.player.pos;
        put(&mut session, &config, EntityKind::Collectible, pos);
        tick(&mut session, &config, &TickInput::default(), SIM_DT);

        assert_eq!(session.phase, GamePhase::Playing);
        let hazards: Vec<&Entity> = session.entities.hazards().collect();
        assert_eq!(hazards.len(), 1);
        assert_eq!(hazards[0].pos.y, 520.0);
        assert!(hazards[0].pos.x > WORLD_WIDTH);
    }

    #[test]
    fn test_cleanup_removes_off_screen() {
        let config = quiet_runner();
        let mut session = GameSession::new(&config, 1, 0).unwrap();
        settle(&mut session, &config);
        let gone = put(&mut session, &config, EntityKind::Hazard, Vec2::new(-79.0, 100.0));
        let kept = put(&mut session, &config, EntityKind::Hazard, Vec2::new(200.0, 100.0));
        session.drain_events();

        tick(&mut session, &config, &TickInput::default(), SIM_DT);
        assert!(!session.entities.contains(gone));
        assert!(session.entities.contains(kept));
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::EntityDespawned {
                id: gone,
                kind: EntityKind::Hazard
            }]
        );
    }

    #[test]
    fn test_overlap_checked_before_cleanup() {
        let mut config = quiet_runner();
        config.player.spawn = Vec2::new(PLAYER_HALF_WIDTH, PLAYER_SPAWN_Y);
        config.world.cleanup_x = 15.0;
        let mut session = GameSession::new(&config, 1, 0).unwrap();
        settle(&mut session, &config);
        // Past the cleanup line after this tick's movement, but touching the player
        let pos = session.player.pos;
        put(&mut session, &config, EntityKind::Collectible, pos);
        tick(&mut session, &config, &TickInput::default(), SIM_DT);
        assert_eq!(session.score.displayed(), 10);
    }

    #[test]
    fn test_restart_only_on_request() {
        let config = GameConfig::runner();
        let mut session = GameSession::new(&config, 5, 0).unwrap();
        settle(&mut session, &config);
        let pos = session.player.pos;
        put(&mut session, &config, EntityKind::Hazard, pos);
        tick(&mut session, &config, &TickInput::default(), SIM_DT);
        assert_eq!(session.phase, GamePhase::Lost);
        let high = session.score.high;

        tick(&mut session, &config, &TickInput::default(), SIM_DT);
        assert_eq!(session.phase, GamePhase::Lost);

        tick(&mut session, &config, &restart_input(), SIM_DT);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.score.displayed(), 0);
        assert_eq!(session.score.high, high);
        assert!(session.entities.is_empty());
        assert_eq!(session.player.pos, config.player.spawn);
        assert_eq!(session.player.vel, Vec2::ZERO);
        assert!(session.player.alive);
        assert!(!session.player.grounded);
        assert_eq!(session.world_speed.current, config.world_speed.base);

        // Timers are re-armed: the immediate spike comes back
        tick(&mut session, &config, &TickInput::default(), SIM_DT);
        assert_eq!(session.entities.count(EntityKind::Hazard), 1);
    }

    #[test]
    fn test_timers_do_not_fire_after_loss() {
        let config = GameConfig::runner();
        let mut session = GameSession::new(&config, 9, 0).unwrap();
        settle(&mut session, &config);
        let pos = session.player.pos;
        put(&mut session, &config, EntityKind::Hazard, pos);
        tick(&mut session, &config, &TickInput::default(), SIM_DT);
        assert_eq!(session.phase, GamePhase::Lost);
        session.drain_events();

        let ids: Vec<EntityId> = session.entities.iter().map(|e| e.id).collect();
        let positions: Vec<Vec2> = session.entities.iter().map(|e| e.pos).collect();
        // Several fish and spike intervals' worth of frozen time
        for _ in 0..(60 * 10) {
            tick(&mut session, &config, &TickInput::default(), SIM_DT);
        }
        assert_eq!(session.phase, GamePhase::Lost);
        assert!(session.drain_events().is_empty());
        assert_eq!(session.entities.iter().map(|e| e.id).collect::<Vec<_>>(), ids);
        assert_eq!(
            session.entities.iter().map(|e| e.pos).collect::<Vec<_>>(),
            positions
        );
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let config = quiet_runner();
        let mut session = GameSession::new(&config, 1, 0).unwrap();
        settle(&mut session, &config);
        let ticks = session.time_ticks;
        tick(&mut session, &config, &restart_input(), SIM_DT);
        assert_eq!(session.time_ticks, ticks + 1);
        assert!(!session.drain_events().contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_world_speed_ramps_entities() {
        let mut config = quiet_runner();
        config.world_speed.step_interval = 0.5;
        let mut session = GameSession::new(&config, 1, 0).unwrap();
        let id = put(&mut session, &config, EntityKind::Hazard, Vec2::new(700.0, 50.0));
        for _ in 0..40 {
            tick(&mut session, &config, &TickInput::default(), SIM_DT);
        }
        let speed = session.world_speed.current;
        assert!(speed > config.world_speed.base);
        let vx = session.entities.get(id).unwrap().vel.x;
        assert_eq!(vx, -speed * config.hazard.speed_multiplier);
        assert!(session.scroll_offset > 0.0);
    }

    #[test]
    fn test_idle_mode_jumps_spike() {
        let mut config = GameConfig::runner();
        config.collectible_spawn = None;
        let mut session = GameSession::new(&config, 11, 0).unwrap();
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..(60 * 20) {
            tick(&mut session, &config, &idle, SIM_DT);
        }
        assert_eq!(session.phase, GamePhase::Playing);
        assert!(session.score.displayed() >= 190);
    }

    #[test]
    fn test_gravity_hazard_bounces_along_ground() {
        let mut config = quiet_runner();
        config.hazard = EntityTemplate {
            gravity_enabled: true,
            bounce: 0.5,
            ..EntityTemplate::spike()
        };
        let mut session = GameSession::new(&config, 1, 0).unwrap();
        let id = put(&mut session, &config, EntityKind::Hazard, Vec2::new(780.0, 300.0));
        let mut bounced = false;
        for _ in 0..60 {
            tick(&mut session, &config, &TickInput::default(), SIM_DT);
            if let Some(spike) = session.entities.get(id) {
                bounced |= spike.vel.y < 0.0;
                assert!(spike.aabb().max.y <= GROUND_TOP + 0.001);
            }
        }
        assert!(bounced);
    }

    /// Reports whatever ids it is given, ignoring geometry
    struct Scripted(Vec<EntityId>);

    impl CollisionSource for Scripted {
        fn overlapping_entities(&self, _: &Player, _: &EntityCollection) -> Vec<EntityId> {
            self.0.clone()
        }
    }

    #[test]
    fn test_repeated_hazard_reports_end_run_once() {
        let config = quiet_runner();
        let mut session = GameSession::new(&config, 1, 0).unwrap();
        let id = put(&mut session, &config, EntityKind::Hazard, Vec2::new(700.0, 50.0));
        session.drain_events();
        let source = Scripted(vec![id, id]);
        for _ in 0..3 {
            tick_with_source(&mut session, &config, &source, &TickInput::default(), SIM_DT);
        }
        let losses = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::RunLost { .. }))
            .count();
        assert_eq!(losses, 1);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn grounded_only_when_touching_ground(
                seed in 0u64..500,
                jumps in proptest::collection::vec(any::<bool>(), 20..120),
            ) {
                let config = quiet_runner();
                let mut session = GameSession::new(&config, seed, 0).unwrap();
                for jump in jumps {
                    let input = TickInput { jump, ..Default::default() };
                    tick(&mut session, &config, &input, SIM_DT);
                    let bottom = session.player.aabb().max.y;
                    if session.player.grounded {
                        prop_assert!((bottom - GROUND_TOP).abs() < 0.001);
                    }
                    prop_assert!(bottom <= GROUND_TOP + 0.001);
                }
            }

            #[test]
            fn score_never_decreases_while_playing(
                seed in 0u64..200,
                ticks in 30usize..600,
            ) {
                let config = GameConfig::runner();
                let mut session = GameSession::new(&config, seed, 0).unwrap();
                let idle = TickInput { idle_mode: true, ..Default::default() };
                let mut last = session.score.current;
                for _ in 0..ticks {
                    tick(&mut session, &config, &idle, SIM_DT);
                    if session.is_terminal() {
                        break;
                    }
                    prop_assert!(session.score.current >= last);
                    last = session.score.current;
                }
            }
        }
    }
}
