//! Fixed-capacity bullet arena
//!
//! Slots are never deallocated during a run. Destroying a bullet clears it
//! and pushes its index back on the free-list stack.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Bullet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletPool {
    slots: Vec<Bullet>,
    /// Indices of inactive slots, top of stack is reused first
    free: Vec<usize>,
}

impl BulletPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Bullet::default(); capacity],
            free: (0..capacity).rev().collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.free.is_empty()
    }

    /// Activate a free slot. `None` when every slot is in flight.
    pub fn acquire(&mut self, pos: Vec2, vel: Vec2) -> Option<usize> {
        let idx = self.free.pop()?;
        self.slots[idx] = Bullet {
            pos,
            vel,
            active: true,
        };
        Some(idx)
    }

    /// Return a slot to the pool. Releasing an inactive slot is a no-op.
    pub fn release(&mut self, idx: usize) -> bool {
        match self.slots.get_mut(idx) {
            Some(bullet) if bullet.active => {
                *bullet = Bullet::default();
                self.free.push(idx);
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, idx: usize) -> Option<&Bullet> {
        self.slots.get(idx).filter(|b| b.active)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Bullet)> {
        self.slots.iter().enumerate().filter(|(_, b)| b.active)
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut Bullet)> {
        self.slots.iter_mut().enumerate().filter(|(_, b)| b.active)
    }

    /// Deactivate every slot
    pub fn clear(&mut self) {
        let capacity = self.slots.len();
        self.slots.iter_mut().for_each(|b| *b = Bullet::default());
        self.free = (0..capacity).rev().collect();
    }
}
