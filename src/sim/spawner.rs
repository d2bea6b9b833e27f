//! Timed enemy waves
//!
//! The timer runs on scene time, decoupled from the tick rate: a long tick
//! may fire it several times, a short one not at all.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{EnemyKind, GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// Most spawn ticks a single `advance` may report; older backlog is dropped
pub const MAX_SPAWN_CATCH_UP: u32 = 4;

/// Periodic spawn trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub interval_ms: f64,
    elapsed_ms: f64,
}

impl SpawnTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Advance by `dt_ms`, returning how many intervals elapsed
    /// (at most [`MAX_SPAWN_CATCH_UP`])
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        self.elapsed_ms += dt_ms;
        let mut fired = 0;
        while self.elapsed_ms >= self.interval_ms && fired < MAX_SPAWN_CATCH_UP {
            self.elapsed_ms -= self.interval_ms;
            fired += 1;
        }
        if self.elapsed_ms >= self.interval_ms {
            log::warn!("Spawn timer behind by {:.1}ms, dropping backlog", self.elapsed_ms);
            self.elapsed_ms = 0.0;
        }
        fired
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }
}

/// Enemies per spawn tick at a given level
pub fn spawn_count(level: u32) -> u32 {
    level / 2 + 1
}

/// Roll a random enemy kind, position and starting velocity
pub fn roll_enemy<R: Rng>(rng: &mut R, tuning: &Tuning, level: u32) -> (EnemyKind, Vec2, Vec2) {
    let x = rng.random_range(tuning.spawn_x_min..=tuning.spawn_x_max) as f32;
    let pos = Vec2::new(x, tuning.spawn_y);

    if rng.random_bool(tuning.grunt_weight) {
        let vx = rng.random_range(-tuning.grunt_vx_range..=tuning.grunt_vx_range) as f32;
        let vy = tuning.grunt_base_speed + level as f32 * tuning.grunt_speed_per_level;
        (EnemyKind::Grunt, pos, Vec2::new(vx, vy))
    } else {
        // Chasers get their velocity from steering on the next tick
        (EnemyKind::Chaser, pos, Vec2::ZERO)
    }
}

/// One spawn tick. Does nothing once the game is over.
/// Returns the number of enemies created.
pub fn spawn_wave(state: &mut GameState) -> u32 {
    if state.phase == GamePhase::GameOver {
        return 0;
    }

    let count = spawn_count(state.level);
    for _ in 0..count {
        let (kind, pos, vel) = roll_enemy(&mut state.rng, &state.tuning, state.level);
        let id = state.push_enemy(kind, pos, vel);
        log::trace!("Spawned {:?} #{} at x={}", kind, id, pos.x);
        state.events.push(GameEvent::EnemySpawned { id, kind, pos });
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_timer_fires_on_interval() {
        let mut timer = SpawnTimer::new(1000.0);
        assert_eq!(timer.advance(999.0), 0);
        assert_eq!(timer.advance(1.0), 1);
        assert_eq!(timer.advance(2500.0), 2);
        assert_eq!(timer.advance(499.0), 0);
        assert_eq!(timer.advance(1.0), 1);
    }

    #[test]
    fn test_timer_catch_up_is_capped() {
        let mut timer = SpawnTimer::new(0.0001);
        assert_eq!(timer.advance(1000.0), MAX_SPAWN_CATCH_UP);
        // Backlog dropped rather than carried into the next tick
        assert_eq!(timer.advance(0.00005), 0);

        let mut zero = SpawnTimer::new(0.0);
        assert_eq!(zero.advance(8.0), MAX_SPAWN_CATCH_UP);
    }

    #[test]
    fn test_timer_reset() {
        let mut timer = SpawnTimer::new(1000.0);
        timer.advance(900.0);
        timer.reset();
        assert_eq!(timer.advance(900.0), 0);
    }

    #[test]
    fn test_spawn_count_by_level() {
        assert_eq!(spawn_count(1), 1);
        assert_eq!(spawn_count(2), 2);
        assert_eq!(spawn_count(3), 2);
        assert_eq!(spawn_count(4), 3);
    }

    #[test]
    fn test_rolled_enemies_within_ranges() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut grunts = 0;
        for _ in 0..1000 {
            let (kind, pos, vel) = roll_enemy(&mut rng, &tuning, 3);
            assert!((50.0..=750.0).contains(&pos.x));
            assert_eq!(pos.y, -50.0);
            match kind {
                EnemyKind::Grunt => {
                    grunts += 1;
                    assert!((-50.0..=50.0).contains(&vel.x));
                    assert_eq!(vel.y, 130.0);
                }
                EnemyKind::Chaser => assert_eq!(vel, Vec2::ZERO),
            }
        }
        // 70/30 split, loosely
        assert!((600..800).contains(&grunts), "grunts = {}", grunts);
    }

    #[test]
    fn test_spawn_wave_scales_with_level() {
        let mut state = GameState::new(11);
        assert_eq!(spawn_wave(&mut state), 1);
        state.level = 4;
        assert_eq!(spawn_wave(&mut state), 3);
        assert_eq!(state.enemies.len(), 4);
        let spawned = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemySpawned { .. }))
            .count();
        assert_eq!(spawned, 4);
    }

    #[test]
    fn test_spawn_suppressed_when_game_over() {
        let mut state = GameState::new(11);
        state.phase = GamePhase::GameOver;
        assert_eq!(spawn_wave(&mut state), 0);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_spawn_is_deterministic() {
        let mut a = GameState::new(77);
        let mut b = GameState::new(77);
        for _ in 0..10 {
            spawn_wave(&mut a);
            spawn_wave(&mut b);
        }
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.kind, eb.kind);
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.vel, eb.vel);
        }
    }
}
