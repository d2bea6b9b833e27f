//! Game state and core simulation types
//!
//! Everything a session needs to replay deterministically lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pool::BulletPool;
use super::spawner::SpawnTimer;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; only a restart press is honoured
    GameOver,
}

/// Enemy behaviour variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Ballistic descent with side-wall bounce
    Grunt,
    /// Steers straight at the player every tick
    Chaser,
}

/// Camera flash tint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlashColor {
    #[default]
    Cyan,
    Red,
}

/// Fire-and-forget notifications for renderer/audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Fired { pos: Vec2 },
    Dashed { vel: Vec2 },
    EnemySpawned { id: u32, kind: EnemyKind, pos: Vec2 },
    EnemyKilled { id: u32, kind: EnemyKind, pos: Vec2 },
    EnemyEscaped { id: u32 },
    PlayerHit { hp: i32 },
    WaveUp { level: u32 },
    GameOver { score: u64, level: u32 },
    Restarted,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Thrust applied this tick (zeroed every tick before input)
    pub accel: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    /// Declared for a future grace period; nothing sets it yet
    pub invulnerable: bool,
    pub drag: f32,
    pub max_speed: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            hp: tuning.player_max_hp,
            max_hp: tuning.player_max_hp,
            invulnerable: false,
            drag: tuning.player_drag,
            max_speed: tuning.player_max_speed,
        }
    }

    /// Engine is firing (drives the trail emitter)
    pub fn thrusting(&self) -> bool {
        self.accel != Vec2::ZERO
    }

    /// Subtract damage, saturating at zero. Returns true if the ship is dead.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp = (self.hp - amount).clamp(0, self.max_hp);
        self.hp <= 0
    }

    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).clamp(0, self.max_hp);
    }

    pub fn half_extents() -> Vec2 {
        Vec2::new(PLAYER_SIZE.0, PLAYER_SIZE.1) * 0.5
    }
}

/// A pooled projectile slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
}

/// A descending enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Cleared on destruction; inactive enemies are purged at end of tick
    pub active: bool,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            vel,
            active: true,
        }
    }

    pub fn half_extents() -> Vec2 {
        Vec2::new(ENEMY_SIZE.0, ENEMY_SIZE.1) * 0.5
    }
}

/// Numbers shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub wave: u32,
    /// Percent, never negative
    pub hp: i32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance values this run was built with
    pub tuning: Tuning,
    /// Seeded RNG; advanced only by spawning
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Always a multiple of `tuning.kill_score`
    pub score: u64,
    /// Wave/level, starts at 1
    pub level: u32,
    /// Scene clock in milliseconds (frozen while game over)
    pub clock_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Earliest scene time the next shot may fire
    pub next_fire_at_ms: f64,
    /// Earliest scene time the next dash may trigger
    pub dash_ready_at_ms: f64,
    pub player: Player,
    pub bullets: BulletPool,
    /// Live enemies (ordered by id)
    pub enemies: Vec<Enemy>,
    pub spawn_timer: SpawnTimer,
    /// Camera shake intensity (0-1)
    pub screen_shake: f32,
    /// Camera flash intensity (0-1)
    pub flash: f32,
    pub flash_color: FlashColor,
    /// Completed restarts, used to derive the next run's seed
    pub restarts: u32,
    /// Pending notifications for the presentation layer
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game state with explicit balance values
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        debug_assert!(tuning.validate().is_ok(), "unvalidated tuning: {:?}", tuning.validate());
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            score: 0,
            level: 1,
            clock_ms: 0.0,
            time_ticks: 0,
            next_fire_at_ms: 0.0,
            dash_ready_at_ms: 0.0,
            player: Player::new(&tuning),
            bullets: BulletPool::new(tuning.bullet_pool_capacity),
            enemies: Vec::new(),
            spawn_timer: SpawnTimer::new(tuning.spawn_interval_ms),
            screen_shake: 0.0,
            flash: 0.0,
            flash_color: FlashColor::default(),
            restarts: 0,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an enemy directly (spawner and tests)
    pub fn push_enemy(&mut self, kind: EnemyKind, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, kind, pos, vel));
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Number of enemies still in play
    pub fn active_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.active).count()
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            wave: self.level,
            hp: self.player.hp.max(0),
        }
    }

    /// Seed for the run that follows a restart
    pub fn next_run_seed(&self) -> u64 {
        self.seed
            .wrapping_add(u64::from(self.restarts) + 1)
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }

    pub(crate) fn bump_shake(&mut self, amount: f32) {
        self.screen_shake = (self.screen_shake + amount).min(1.0);
    }

    pub(crate) fn trigger_flash(&mut self, color: FlashColor) {
        self.flash = 1.0;
        self.flash_color = color;
    }
}
