//! Neon Void - A single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input, movement, spawning, collisions, game state)
//! - `session`: Fixed-timestep driver owning the game state
//! - `tuning`: Data-driven game balance

pub mod session;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Player spawn point
    pub const PLAYER_START_X: f32 = 400.0;
    pub const PLAYER_START_Y: f32 = 500.0;

    /// Sprite extents (width, height)
    pub const PLAYER_SIZE: (f32, f32) = (32.0, 32.0);
    pub const BULLET_SIZE: (f32, f32) = (4.0, 16.0);
    pub const ENEMY_SIZE: (f32, f32) = (24.0, 24.0);

    /// Bullets leave the ship this far above its center
    pub const MUZZLE_OFFSET: f32 = 20.0;
}

/// Clamp a point so a box of `half` extents stays inside the world.
///
/// Returns the clamped position and, per axis, whether clamping occurred.
#[inline]
pub fn clamp_to_world(pos: Vec2, half: Vec2) -> (Vec2, (bool, bool)) {
    let min = half;
    let max = Vec2::new(consts::WORLD_WIDTH, consts::WORLD_HEIGHT) - half;
    let clamped = pos.clamp(min, max);
    (clamped, (clamped.x != pos.x, clamped.y != pos.y))
}

/// Move `value` toward zero by `amount` without crossing it
#[inline]
pub fn approach_zero(value: f32, amount: f32) -> f32 {
    if value > 0.0 {
        (value - amount).max(0.0)
    } else {
        (value + amount).min(0.0)
    }
}
