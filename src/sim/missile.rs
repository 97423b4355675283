//! Player projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::MissileTuning;

/// A missile fired horizontally by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Missile {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed magnitude (px/tick)
    pub speed: f32,
    /// +1 travels right, -1 travels left
    pub direction: f32,
    /// Cleared once the missile leaves the world; never set again
    pub active: bool,
}

impl Missile {
    pub fn new(id: u32, pos: Vec2, direction: f32, tuning: &MissileTuning) -> Self {
        Self {
            id,
            pos,
            size: tuning.size(),
            speed: tuning.speed,
            direction: direction.signum(),
            active: true,
        }
    }

    /// Advance one tick, deactivating once fully past either side of the world
    pub fn update(&mut self, world_width: f32) {
        if !self.active {
            return;
        }
        self.pos.x += self.speed * self.direction;
        if self.pos.x + self.size.x < 0.0 || self.pos.x > world_width {
            self.active = false;
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}
