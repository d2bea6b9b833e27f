//! Overlap detection for sprites
//!
//! Plain axis-aligned boxes, tested once per tick (no sweeping). Hits are
//! resolved in a single pass; anything consumed earlier in the pass is
//! skipped so one bullet or enemy can never count twice.

use glam::Vec2;

use super::pool::BulletPool;
use super::state::{Enemy, EnemyKind, Player};
use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, size: (f32, f32)) -> Self {
        let half = Vec2::new(size.0, size.1) * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap: boxes that only touch along an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// An enemy destroyed by a bullet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kill {
    pub enemy_id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
}

/// Result of player contact resolution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactOutcome {
    /// Player hp after each hit, in order
    pub hits: Vec<i32>,
    /// The last hit dropped hp to zero
    pub fatal: bool,
}

/// Bullet vs enemy pass. Bullets are recycled, enemies deactivated.
pub fn resolve_bullet_hits(bullets: &mut BulletPool, enemies: &mut [Enemy]) -> Vec<Kill> {
    let mut spent = Vec::new();
    let mut kills = Vec::new();

    for (idx, bullet) in bullets.iter_active() {
        let bullet_box = Aabb::from_center(bullet.pos, BULLET_SIZE);
        let target = enemies
            .iter_mut()
            .filter(|e| e.active)
            .find(|e| bullet_box.overlaps(&Aabb::from_center(e.pos, ENEMY_SIZE)));

        if let Some(enemy) = target {
            enemy.active = false;
            spent.push(idx);
            kills.push(Kill {
                enemy_id: enemy.id,
                kind: enemy.kind,
                pos: enemy.pos,
            });
        }
    }

    for idx in spent {
        bullets.release(idx);
    }
    kills
}

/// Player vs enemy pass. Each touching enemy is destroyed and deals
/// `damage`; the pass stops at the first fatal hit.
pub fn resolve_player_contacts(
    player: &mut Player,
    enemies: &mut [Enemy],
    damage: i32,
) -> ContactOutcome {
    let player_box = Aabb::from_center(player.pos, PLAYER_SIZE);
    let mut outcome = ContactOutcome::default();

    for enemy in enemies.iter_mut().filter(|e| e.active) {
        if !player_box.overlaps(&Aabb::from_center(enemy.pos, ENEMY_SIZE)) {
            continue;
        }
        enemy.active = false;
        let dead = player.take_damage(damage);
        outcome.hits.push(player.hp);
        if dead {
            outcome.fatal = true;
            break;
        }
    }
    outcome
}
