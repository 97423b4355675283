//! Data-driven game balance
//!
//! Every gameplay constant lives here. Defaults reproduce the classic feel;
//! a JSON file can override any subset of fields.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::TICK_MS;
use crate::error::Error;
use crate::sim::World;

/// Where a missile appears relative to the player anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MuzzleOffset {
    /// X offset when facing right
    pub forward_x: f32,
    /// X offset when facing left
    pub backward_x: f32,
    pub y: f32,
}

impl Default for MuzzleOffset {
    fn default() -> Self {
        Self {
            forward_x: 65.0,
            backward_x: -25.0,
            y: -25.0,
        }
    }
}

/// Player hit-box as edge offsets from the player anchor.
///
/// Narrower and shorter than what gets drawn, so grazes don't count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitBox {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for HitBox {
    fn default() -> Self {
        Self {
            left: -20.0,
            right: 40.0,
            top: -35.0,
            bottom: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Horizontal speed cap for Skater and Tank (px/tick)
    pub max_speed: f32,
    /// Horizontal speed cap for Jet (px/tick)
    pub jet_max_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub gravity: f32,
    /// Vertical impulse applied by a jump (negative is up)
    pub jump_force: f32,
    /// Vertical speed while climbing or diving as a Jet
    pub jet_climb_speed: f32,
    /// Upward drift when hovering close to the ground
    pub jet_hover_lift: f32,
    /// Distance above ground inside which hover lift applies
    pub jet_hover_margin: f32,
    /// Simulated time spent as a Skater before becoming a Tank
    pub morph_duration_ms: u32,
    pub fire_cooldown_ms: u32,
    /// Random spawn x is drawn from `[0, world.width - spawn_margin)`
    pub spawn_margin: f32,
    pub muzzle: MuzzleOffset,
    pub hitbox: HitBox,
    /// Ticks each sprite frame stays on screen
    pub anim_ticks_per_frame: u32,
    /// Sprite frames per form, cycled in order
    pub anim_frames: u8,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 60.0,
            max_speed: 6.0,
            jet_max_speed: 8.0,
            acceleration: 0.5,
            deceleration: 0.3,
            gravity: 0.5,
            jump_force: -12.0,
            jet_climb_speed: 5.0,
            jet_hover_lift: 0.5,
            jet_hover_margin: 50.0,
            morph_duration_ms: 2000,
            fire_cooldown_ms: 500,
            spawn_margin: 100.0,
            muzzle: MuzzleOffset::default(),
            hitbox: HitBox::default(),
            anim_ticks_per_frame: 5,
            anim_frames: 4,
        }
    }
}

impl PlayerTuning {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub width: f32,
    pub height: f32,
    /// Pursuit speed (px/tick)
    pub speed: f32,
    /// Multiplier on the vertical pursuit component
    pub vertical_damping: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 40.0,
            speed: 1.5,
            vertical_damping: 0.8,
        }
    }
}

impl EnemyTuning {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissileTuning {
    pub width: f32,
    pub height: f32,
    /// Horizontal speed (px/tick)
    pub speed: f32,
}

impl Default for MissileTuning {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 8.0,
            speed: 10.0,
        }
    }
}

impl MissileTuning {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world: World,
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub missile: MissileTuning,
    /// Score awarded per enemy destroyed
    pub kill_bounty: u64,
    /// Simulated milliseconds per tick
    pub tick_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world: World::default(),
            player: PlayerTuning::default(),
            enemy: EnemyTuning::default(),
            missile: MissileTuning::default(),
            kill_bounty: 100,
            tick_ms: TICK_MS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON balance file
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate();
        Ok(tuning)
    }

    /// Load tuning overrides from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Clamp values that would break the simulation
    pub fn validate(&mut self) {
        let defaults = Tuning::default();

        clamp_positive(&mut self.player.width, defaults.player.width, "player.width");
        clamp_positive(&mut self.player.height, defaults.player.height, "player.height");
        clamp_positive(&mut self.enemy.width, defaults.enemy.width, "enemy.width");
        clamp_positive(&mut self.enemy.height, defaults.enemy.height, "enemy.height");
        clamp_positive(&mut self.missile.width, defaults.missile.width, "missile.width");
        clamp_positive(&mut self.missile.height, defaults.missile.height, "missile.height");

        for (value, name) in [
            (&mut self.player.max_speed, "player.max_speed"),
            (&mut self.player.jet_max_speed, "player.jet_max_speed"),
            (&mut self.player.acceleration, "player.acceleration"),
            (&mut self.player.deceleration, "player.deceleration"),
            (&mut self.player.jet_climb_speed, "player.jet_climb_speed"),
            (&mut self.enemy.speed, "enemy.speed"),
            (&mut self.missile.speed, "missile.speed"),
        ] {
            if *value < 0.0 {
                log::warn!("Tuning {} = {} is negative, clamping to 0", name, value);
                *value = 0.0;
            }
        }

        if self.player.anim_ticks_per_frame == 0 {
            log::warn!("Tuning player.anim_ticks_per_frame = 0, using 1");
            self.player.anim_ticks_per_frame = 1;
        }
        if self.player.anim_frames == 0 {
            log::warn!("Tuning player.anim_frames = 0, using 1");
            self.player.anim_frames = 1;
        }

        if self.tick_ms == 0 {
            log::warn!("Tuning tick_ms = 0, using {}", TICK_MS);
            self.tick_ms = TICK_MS;
        }

        // World must at least fit the player
        let min_width = self.player.width;
        if self.world.width < min_width {
            log::warn!(
                "Tuning world.width = {} narrower than player, clamping to {}",
                self.world.width,
                min_width
            );
            self.world.width = min_width;
        }
        self.world.ground_level = self.world.ground_level.clamp(0.0, self.world.height.max(0.0));
        self.world.jet_ceiling = self.world.jet_ceiling.clamp(0.0, self.world.ground_level);
    }
}

fn clamp_positive(value: &mut f32, fallback: f32, name: &str) {
    if *value <= 0.0 {
        log::warn!("Tuning {} = {} must be positive, using {}", name, value, fallback);
        *value = fallback;
    }
}
