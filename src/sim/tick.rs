//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically:
//! input -> player motion -> spawn timer -> enemies/bullets -> collisions
//! -> score/wave/game-over transitions.

use glam::Vec2;

use super::collision::{Kill, resolve_bullet_hits, resolve_player_contacts};
use super::movement::{
    apply_dash, cull_escaped, integrate_bullets, integrate_enemies, integrate_player_position,
    integrate_player_velocity, steer_chasers,
};
use super::spawner::spawn_wave;
use super::state::{FlashColor, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Horizontal thrust direction: -1, 0 or 1
    pub thrust_x: i8,
    /// Vertical thrust direction (+1 is down): -1, 0 or 1
    pub thrust_y: i8,
    /// Fire held (auto-fire, rate limited)
    pub fire: bool,
    /// Fire went down this frame (restart trigger)
    pub fire_pressed: bool,
    /// Dash went down this frame
    pub dash_pressed: bool,
}

/// Advance the game state by one timestep of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::GameOver {
        if input.fire_pressed {
            restart(state);
        }
        return;
    }

    let dt_ms = f64::from(dt) * 1000.0;
    state.clock_ms += dt_ms;
    state.time_ticks += 1;

    decay_camera_effects(state);

    // --- PLAYER ---
    integrate_player_velocity(
        &mut state.player,
        (input.thrust_x, input.thrust_y),
        state.tuning.player_accel,
        dt,
    );

    if input.dash_pressed && state.clock_ms > state.dash_ready_at_ms {
        apply_dash(&mut state.player, state.tuning.dash_multiplier);
        state.dash_ready_at_ms = state.clock_ms + state.tuning.dash_cooldown_ms;
        state.events.push(GameEvent::Dashed {
            vel: state.player.vel,
        });
    }

    integrate_player_position(&mut state.player, dt);

    if input.fire && state.clock_ms > state.next_fire_at_ms {
        try_fire(state);
    }

    // --- SPAWNER (scene-time timer, independent of tick rate) ---
    let spawns = state.spawn_timer.advance(dt_ms);
    for _ in 0..spawns {
        spawn_wave(state);
    }

    // --- ENEMIES & BULLETS ---
    steer_chasers(&mut state.enemies, state.player.pos, state.tuning.chaser_speed);
    integrate_enemies(&mut state.enemies, dt);
    integrate_bullets(&mut state.bullets, dt, state.tuning.bullet_cull_y);

    for id in cull_escaped(&mut state.enemies, state.tuning.enemy_cull_y) {
        state.events.push(GameEvent::EnemyEscaped { id });
    }

    // --- COLLISIONS ---
    for kill in resolve_bullet_hits(&mut state.bullets, &mut state.enemies) {
        register_kill(state, kill);
    }

    let outcome = resolve_player_contacts(
        &mut state.player,
        &mut state.enemies,
        state.tuning.contact_damage,
    );
    for hp in outcome.hits {
        state.events.push(GameEvent::PlayerHit { hp });
        state.bump_shake(0.2);
        state.trigger_flash(FlashColor::Red);
    }
    if outcome.fatal {
        enter_game_over(state);
    }

    state.enemies.retain(|e| e.active);
}

/// Spawn a bullet at the ship's nose if the pool has a free slot.
/// An exhausted pool silently skips the shot and leaves the cooldown unarmed.
fn try_fire(state: &mut GameState) {
    let muzzle = state.player.pos - Vec2::new(0.0, MUZZLE_OFFSET);
    let vel = Vec2::new(0.0, -state.tuning.bullet_speed);
    if state.bullets.acquire(muzzle, vel).is_some() {
        state.next_fire_at_ms = state.clock_ms + state.tuning.fire_cooldown_ms;
        state.events.push(GameEvent::Fired { pos: muzzle });
    }
}

/// Award a kill and handle the wave threshold
pub fn register_kill(state: &mut GameState, kill: Kill) {
    state.score += state.tuning.kill_score;
    state.bump_shake(0.1);
    state.events.push(GameEvent::EnemyKilled {
        id: kill.enemy_id,
        kind: kill.kind,
        pos: kill.pos,
    });
    log::debug!("Killed {:?} #{}, score {}", kill.kind, kill.enemy_id, state.score);

    if state.score % state.tuning.wave_score_step == 0 {
        state.level += 1;
        state.player.heal(state.tuning.wave_heal);
        state.trigger_flash(FlashColor::Cyan);
        state.events.push(GameEvent::WaveUp { level: state.level });
        log::info!("Wave {} reached (score {})", state.level, state.score);
    }
}

/// Freeze the run. Only a restart press leaves this phase.
pub fn enter_game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.player.vel = Vec2::ZERO;
    state.player.accel = Vec2::ZERO;
    state.events.push(GameEvent::GameOver {
        score: state.score,
        level: state.level,
    });
    log::info!("Game over: score {}, wave {}", state.score, state.level);
}

/// Rebuild the whole scene from scratch with a fresh derived seed
pub fn restart(state: &mut GameState) {
    let seed = state.next_run_seed();
    let restarts = state.restarts + 1;
    let tuning = state.tuning.clone();
    // Undrained notifications (e.g. GameOver) outlive the rebuild
    let events = std::mem::take(&mut state.events);

    *state = GameState::with_tuning(seed, tuning);
    state.restarts = restarts;
    state.events = events;
    state.events.push(GameEvent::Restarted);
    log::info!("Restarted (run {}, seed {})", restarts + 1, seed);
}

fn decay_camera_effects(state: &mut GameState) {
    state.screen_shake *= 0.9;
    if state.screen_shake < 0.01 {
        state.screen_shake = 0.0;
    }

    state.flash *= 0.95;
    if state.flash < 0.01 {
        state.flash = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyKind;

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    fn count_events(state: &GameState, pred: impl Fn(&GameEvent) -> bool) -> usize {
        state.events.iter().filter(|e| pred(e)).count()
    }

    #[test]
    fn test_fire_cooldown() {
        let mut state = GameState::new(1);
        // ~100ms of held fire
        for _ in 0..12 {
            tick(&mut state, &fire(), SIM_DT);
        }
        assert_eq!(state.bullets.active_count(), 1);

        // Past 150ms a second shot goes out
        for _ in 0..8 {
            tick(&mut state, &fire(), SIM_DT);
        }
        assert_eq!(state.bullets.active_count(), 2);
    }

    #[test]
    fn test_bullet_leaves_muzzle_upward() {
        let mut state = GameState::new(1);
        tick(&mut state, &fire(), SIM_DT);
        let (_, bullet) = state.bullets.iter_active().next().unwrap();
        assert_eq!(bullet.vel, Vec2::new(0.0, -500.0));
        assert!(bullet.pos.y < state.player.pos.y - 15.0);
    }

    #[test]
    fn test_exhausted_pool_skips_shot() {
        let mut state = GameState::new(1);
        while state.bullets.acquire(Vec2::new(10.0, 300.0), Vec2::ZERO).is_some() {}
        tick(&mut state, &fire(), SIM_DT);
        assert_eq!(state.bullets.active_count(), 50);
        assert_eq!(state.next_fire_at_ms, 0.0);
        assert_eq!(count_events(&state, |e| matches!(e, GameEvent::Fired { .. })), 0);
    }

    #[test]
    fn test_dash_cooldown() {
        let mut state = GameState::new(1);
        let dash = TickInput {
            thrust_x: 1,
            dash_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &dash, SIM_DT);
        let dashed_vel = state.player.vel.x;
        assert!((dashed_vel - 2.0 * 800.0 * SIM_DT).abs() < 1e-3);

        // Second press 500ms later is ignored
        for _ in 0..59 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        tick(&mut state, &dash, SIM_DT);
        assert_eq!(count_events(&state, |e| matches!(e, GameEvent::Dashed { .. })), 1);

        // After the cooldown it works again
        for _ in 0..70 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        tick(&mut state, &dash, SIM_DT);
        assert_eq!(count_events(&state, |e| matches!(e, GameEvent::Dashed { .. })), 2);
    }

    #[test]
    fn test_spawner_runs_on_scene_time() {
        let mut state = GameState::new(3);
        // Just under one second: nothing yet
        for _ in 0..119 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(count_events(&state, |e| matches!(e, GameEvent::EnemySpawned { .. })), 0);
        // Float accumulation may land the 1000ms boundary a tick late
        tick(&mut state, &TickInput::default(), SIM_DT);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(count_events(&state, |e| matches!(e, GameEvent::EnemySpawned { .. })), 1);
    }

    #[test]
    fn test_kill_scores() {
        let mut state = GameState::new(1);
        state.bullets.acquire(Vec2::new(400.0, 300.0), Vec2::ZERO);
        state.push_enemy(EnemyKind::Grunt, Vec2::new(405.0, 305.0), Vec2::ZERO);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.score, 100);
        assert!(state.enemies.is_empty());
        assert_eq!(state.bullets.active_count(), 0);
        assert!(state.screen_shake > 0.0);
    }

    #[test]
    fn test_wave_up_heals() {
        let mut state = GameState::new(1);
        state.score = 900;
        state.player.hp = 50;
        register_kill(
            &mut state,
            Kill {
                enemy_id: 1,
                kind: EnemyKind::Chaser,
                pos: Vec2::ZERO,
            },
        );
        assert_eq!(state.score, 1000);
        assert_eq!(state.level, 2);
        assert_eq!(state.player.hp, 70);
        assert!(state.events.contains(&GameEvent::WaveUp { level: 2 }));
    }

    #[test]
    fn test_game_over_freezes_sim() {
        let mut state = GameState::new(1);
        state.player.hp = 20;
        let pos = state.player.pos;
        state.push_enemy(EnemyKind::Grunt, pos, Vec2::ZERO);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.vel, Vec2::ZERO);

        let clock = state.clock_ms;
        state.push_enemy(EnemyKind::Grunt, Vec2::new(100.0, 100.0), Vec2::new(0.0, 100.0));
        for _ in 0..300 {
            tick(&mut state, &fire(), SIM_DT);
        }
        assert_eq!(state.clock_ms, clock);
        assert_eq!(state.enemies[0].pos, Vec2::new(100.0, 100.0));
        assert_eq!(state.bullets.active_count(), 0);
    }

    #[test]
    fn test_restart_requires_press() {
        let mut state = GameState::new(1);
        state.score = 700;
        enter_game_over(&mut state);
        tick(&mut state, &fire(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        let press = TickInput {
            fire: true,
            fire_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &press, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.restarts, 1);
        assert_ne!(state.seed, 1);
        assert_eq!(
            state.events,
            vec![GameEvent::GameOver { score: 700, level: 1 }, GameEvent::Restarted]
        );
    }

    #[test]
    fn test_level_tracks_score_across_waves() {
        let mut state = GameState::new(1);
        state.player.hp = 10;
        for n in 1..=35u64 {
            register_kill(
                &mut state,
                Kill {
                    enemy_id: n as u32,
                    kind: EnemyKind::Grunt,
                    pos: Vec2::ZERO,
                },
            );
            assert_eq!(state.score, n * 100);
            assert_eq!(u64::from(state.level), 1 + state.score / 1000);
        }
        assert_eq!(state.level, 4);
        assert_eq!(state.player.hp, 70);
        let wave_ups: Vec<_> = state
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::WaveUp { level } => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(wave_ups, vec![2, 3, 4]);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                thrust_x: 1,
                fire: true,
                ..Default::default()
            },
            TickInput {
                thrust_y: -1,
                dash_pressed: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..1200 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }
}
