//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID / pool slot)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod input;
pub mod movement;
pub mod pool;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, ContactOutcome, Kill, resolve_bullet_hits, resolve_player_contacts};
pub use input::{Controls, InputResolver, Key};
pub use pool::BulletPool;
pub use spawner::{SpawnTimer, spawn_count, spawn_wave};
pub use state::{
    Bullet, Enemy, EnemyKind, FlashColor, GameEvent, GamePhase, GameState, Hud, Player,
};
pub use tick::{TickInput, enter_game_over, register_kill, restart, tick};
