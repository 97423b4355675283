//! Pursuing enemy

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::missile::Missile;
use super::state::World;
use crate::tuning::{EnemyTuning, HitBox};

/// Screen edge the enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnSide {
    Left,
    Right,
}

/// The single live enemy, chasing the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub side: SpawnSide,
    pub speed: f32,
    pub vertical_damping: f32,
}

impl Enemy {
    /// Spawn just off-screen on `side`.
    ///
    /// Altitude is fixed here from the player's form at spawn time: somewhere
    /// in the sky band when the player is a Jet, on the ground otherwise.
    pub fn spawn(
        id: u32,
        side: SpawnSide,
        player_is_jet: bool,
        world: &World,
        tuning: &EnemyTuning,
        rng: &mut impl Rng,
    ) -> Self {
        let y = if player_is_jet {
            world.sky_level + rng.random::<f32>() * world.sky_band
        } else {
            world.ground_level
        };
        Self::new(id, side, y, world, tuning)
    }

    /// Spawn on a random side
    pub fn spawn_random(
        id: u32,
        player_is_jet: bool,
        world: &World,
        tuning: &EnemyTuning,
        rng: &mut impl Rng,
    ) -> Self {
        let side = if rng.random_bool(0.5) {
            SpawnSide::Left
        } else {
            SpawnSide::Right
        };
        Self::spawn(id, side, player_is_jet, world, tuning, rng)
    }

    /// Construct at an explicit altitude, clamped into the world
    pub fn new(id: u32, side: SpawnSide, y: f32, world: &World, tuning: &EnemyTuning) -> Self {
        let size = tuning.size();
        let x = match side {
            SpawnSide::Left => -size.x,
            SpawnSide::Right => world.width,
        };
        let y = y.clamp(0.0, (world.height - size.y).max(0.0));
        Self {
            id,
            pos: Vec2::new(x, y),
            size,
            side,
            speed: tuning.speed,
            vertical_damping: tuning.vertical_damping,
        }
    }

    /// Step toward `target` at constant speed, damping the vertical component.
    ///
    /// Already on top of the target means no movement this tick.
    pub fn update(&mut self, target: Vec2) {
        let to_target = target - self.pos;
        let Some(dir) = to_target.try_normalize() else {
            return;
        };
        self.pos.x += dir.x * self.speed;
        self.pos.y += dir.y * self.speed * self.vertical_damping;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Whether `missile` overlaps this enemy
    pub fn check_collision(&self, missile: &Missile) -> bool {
        self.bounds().overlaps(&missile.bounds())
    }

    /// Whether this enemy touches the player's hit-box around `player_pos`
    pub fn check_player_collision(&self, player_pos: Vec2, hitbox: &HitBox) -> bool {
        let player_box = Rect::from_edges(
            player_pos.x + hitbox.left,
            player_pos.y + hitbox.top,
            player_pos.x + hitbox.right,
            player_pos.y + hitbox.bottom,
        );
        self.bounds().overlaps(&player_box)
    }
}
