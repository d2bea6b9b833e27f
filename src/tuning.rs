//! Data-driven game balance
//!
//! Every gameplay number lives here so balance passes don't touch the sim.
//! Partial JSON is accepted: missing fields keep their default values.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;

/// Errors raised while loading or validating tuning data
#[derive(Debug)]
pub enum TuningError {
    /// File could not be read
    Io(std::io::Error),
    /// JSON was malformed or had the wrong shape
    Parse(serde_json::Error),
    /// Values parsed but make no sense together
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {}", e),
            TuningError::Parse(e) => write!(f, "failed to parse tuning: {}", e),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {}", reason),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Thrust along each held direction (units/s²)
    pub player_accel: f32,
    /// Linear drag on axes with no thrust (units/s²)
    pub player_drag: f32,
    /// Per-axis speed cap (units/s)
    pub player_max_speed: f32,
    pub player_max_hp: i32,
    /// Velocity multiplier applied by a dash
    pub dash_multiplier: f32,
    pub dash_cooldown_ms: f64,

    // === Weapons ===
    pub fire_cooldown_ms: f64,
    pub bullet_speed: f32,
    pub bullet_pool_capacity: usize,
    /// Bullets above this y are recycled
    pub bullet_cull_y: f32,

    // === Spawning ===
    pub spawn_interval_ms: f64,
    pub spawn_x_min: i32,
    pub spawn_x_max: i32,
    pub spawn_y: f32,
    /// Probability that a spawned enemy is a grunt (otherwise chaser)
    pub grunt_weight: f64,
    pub grunt_vx_range: i32,
    pub grunt_base_speed: f32,
    pub grunt_speed_per_level: f32,
    pub chaser_speed: f32,
    /// Enemies below this y have escaped
    pub enemy_cull_y: f32,

    // === Scoring ===
    pub kill_score: u64,
    /// Every multiple of this score advances the wave
    pub wave_score_step: u64,
    pub wave_heal: i32,
    pub contact_damage: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_accel: 800.0,
            player_drag: 1000.0,
            player_max_speed: 300.0,
            player_max_hp: 100,
            dash_multiplier: 2.0,
            dash_cooldown_ms: 1000.0,

            fire_cooldown_ms: 150.0,
            bullet_speed: 500.0,
            bullet_pool_capacity: 50,
            bullet_cull_y: -50.0,

            spawn_interval_ms: 1000.0,
            spawn_x_min: 50,
            spawn_x_max: 750,
            spawn_y: -50.0,
            grunt_weight: 0.7,
            grunt_vx_range: 50,
            grunt_base_speed: 100.0,
            grunt_speed_per_level: 10.0,
            chaser_speed: 150.0,
            enemy_cull_y: 650.0,

            kill_score: 100,
            wave_score_step: 1000,
            wave_heal: 20,
            contact_damage: 20,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for writing a template file)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |reason: &str| Err(TuningError::Invalid(reason.to_string()));

        if self.player_max_hp <= 0 {
            return invalid("player_max_hp must be positive");
        }
        if self.player_max_speed <= 0.0 || self.player_accel < 0.0 || self.player_drag < 0.0 {
            return invalid("player motion values must be non-negative with a positive max speed");
        }
        if self.bullet_pool_capacity == 0 {
            return invalid("bullet_pool_capacity must be at least 1");
        }
        // At most one spawn tick per simulation step
        if self.spawn_interval_ms < f64::from(SIM_DT) * 1000.0 {
            return invalid("spawn_interval_ms must be at least one simulation step");
        }
        if self.spawn_x_min > self.spawn_x_max {
            return invalid("spawn_x_min must not exceed spawn_x_max");
        }
        if !(0.0..=1.0).contains(&self.grunt_weight) {
            return invalid("grunt_weight must be within [0, 1]");
        }
        if self.grunt_vx_range < 0 {
            return invalid("grunt_vx_range must be non-negative");
        }
        if self.kill_score == 0 || self.wave_score_step == 0 {
            return invalid("kill_score and wave_score_step must be positive");
        }
        if self.contact_damage < 0 || self.wave_heal < 0 {
            return invalid("contact_damage and wave_heal must be non-negative");
        }
        // Wave-ups trigger on exact multiples, so kills must land on every step
        if self.wave_score_step % self.kill_score != 0 {
            return invalid("wave_score_step must be a multiple of kill_score");
        }
        Ok(())
    }
}
