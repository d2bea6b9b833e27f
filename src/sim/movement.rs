//! Per-tick motion integration
//!
//! Arcade-style physics: thrust on held axes, linear drag on released axes,
//! per-axis speed cap, explicit world clamps. No collision response except
//! the grunt side-wall bounce.

use glam::Vec2;

use super::pool::BulletPool;
use super::state::{Enemy, EnemyKind, Player};
use crate::consts::*;
use crate::{approach_zero, clamp_to_world};

/// Update player velocity from thrust direction. Position is untouched.
pub fn integrate_player_velocity(player: &mut Player, thrust: (i8, i8), accel: f32, dt: f32) {
    player.accel = Vec2::new(f32::from(thrust.0), f32::from(thrust.1)) * accel;

    let drag = player.drag * dt;
    player.vel.x = if player.accel.x != 0.0 {
        player.vel.x + player.accel.x * dt
    } else {
        approach_zero(player.vel.x, drag)
    };
    player.vel.y = if player.accel.y != 0.0 {
        player.vel.y + player.accel.y * dt
    } else {
        approach_zero(player.vel.y, drag)
    };

    let max = player.max_speed;
    player.vel = player.vel.clamp(Vec2::splat(-max), Vec2::splat(max));
}

/// Instant velocity impulse. Deliberately uncapped.
pub fn apply_dash(player: &mut Player, multiplier: f32) {
    player.vel *= multiplier;
}

/// Move the player and keep its sprite inside the world
pub fn integrate_player_position(player: &mut Player, dt: f32) {
    let (pos, (hit_x, hit_y)) =
        clamp_to_world(player.pos + player.vel * dt, Player::half_extents());
    player.pos = pos;
    if hit_x {
        player.vel.x = 0.0;
    }
    if hit_y {
        player.vel.y = 0.0;
    }
}

/// Advance bullets and recycle any that left the top of the screen.
/// Returns the number recycled.
pub fn integrate_bullets(bullets: &mut BulletPool, dt: f32, cull_y: f32) -> usize {
    let mut expired = Vec::new();
    for (idx, bullet) in bullets.iter_active_mut() {
        bullet.pos += bullet.vel * dt;
        if bullet.pos.y < cull_y {
            expired.push(idx);
        }
    }
    for idx in &expired {
        bullets.release(*idx);
    }
    expired.len()
}

/// Re-aim every chaser at the player's current position
pub fn steer_chasers(enemies: &mut [Enemy], target: Vec2, speed: f32) {
    for enemy in enemies
        .iter_mut()
        .filter(|e| e.active && e.kind == EnemyKind::Chaser)
    {
        enemy.vel = (target - enemy.pos).normalize_or_zero() * speed;
    }
}

/// Advance enemies; grunts reflect off the side walls
pub fn integrate_enemies(enemies: &mut [Enemy], dt: f32) {
    let half = Enemy::half_extents();
    for enemy in enemies.iter_mut().filter(|e| e.active) {
        enemy.pos += enemy.vel * dt;

        if enemy.kind == EnemyKind::Grunt {
            if enemy.pos.x - half.x < 0.0 && enemy.vel.x < 0.0 {
                enemy.pos.x = half.x;
                enemy.vel.x = -enemy.vel.x;
            } else if enemy.pos.x + half.x > WORLD_WIDTH && enemy.vel.x > 0.0 {
                enemy.pos.x = WORLD_WIDTH - half.x;
                enemy.vel.x = -enemy.vel.x;
            }
        }
    }
}

/// Deactivate enemies that fell past `cull_y`. Returns their ids.
pub fn cull_escaped(enemies: &mut [Enemy], cull_y: f32) -> Vec<u32> {
    enemies
        .iter_mut()
        .filter(|e| e.active && e.pos.y > cull_y)
        .map(|e| {
            e.active = false;
            e.id
        })
        .collect()
}
