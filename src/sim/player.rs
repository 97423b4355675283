//! The morphing player: skater, then tank, then jet
//!
//! Owns its missiles. Cross-entity work (missile hits, respawning the enemy)
//! takes the enemy as an explicit argument each tick; nothing here holds a
//! reference back into the game state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::missile::Missile;
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Player form. Only ever advances Skater -> Tank -> Jet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MorphState {
    /// Starting form, cannot fire
    Skater,
    /// Reached automatically after the morph duration
    Tank,
    /// Reached from Tank on a transform request, never reverts
    Jet,
}

impl MorphState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MorphState::Skater => "Skater",
            MorphState::Tank => "Tank",
            MorphState::Jet => "Jet",
        }
    }
}

/// What changed during one `Player::update`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerStep {
    /// Set on the tick the player changed form
    pub morphed: Option<MorphState>,
    /// Id of the missile fired this tick
    pub fired: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Anchor point; y sits on the ground line while grounded
    pub pos: Vec2,
    pub size: Vec2,
    pub morph: MorphState,
    /// Simulated time since spawn, drives the Skater -> Tank morph
    pub morph_elapsed_ms: u32,
    /// Signed horizontal speed (px/tick)
    pub speed: f32,
    /// Vertical velocity (px/tick, positive is down)
    pub vel_y: f32,
    /// +1 facing right, -1 facing left
    pub direction: f32,
    /// Airborne after a jump until landing
    pub jumping: bool,
    /// Remaining fire cooldown; firing is allowed at zero
    pub fire_cooldown_ms: u32,
    /// Live missiles (sorted by id)
    pub missiles: Vec<Missile>,
    /// Current sprite frame, cosmetic only
    pub anim_frame: u8,
    anim_ticks: u32,
    next_missile_id: u32,
}

impl Player {
    /// Create a Skater on the ground at `x`, clamped into the world
    pub fn new(x: f32, tuning: &Tuning) -> Self {
        let size = tuning.player.size();
        let max_x = (tuning.world.width - size.x).max(0.0);
        Self {
            pos: Vec2::new(x.clamp(0.0, max_x), tuning.world.ground_level),
            size,
            morph: MorphState::Skater,
            morph_elapsed_ms: 0,
            speed: 0.0,
            vel_y: 0.0,
            direction: 1.0,
            jumping: false,
            fire_cooldown_ms: 0,
            missiles: Vec::new(),
            anim_frame: 0,
            anim_ticks: 0,
            next_missile_id: 1,
        }
    }

    pub fn is_skater(&self) -> bool {
        self.morph == MorphState::Skater
    }

    pub fn is_tank(&self) -> bool {
        self.morph == MorphState::Tank
    }

    pub fn is_jet(&self) -> bool {
        self.morph == MorphState::Jet
    }

    pub fn can_fire(&self) -> bool {
        !self.is_skater() && self.fire_cooldown_ms == 0
    }

    /// Jump if grounded. Jets steer with up/down instead.
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if self.jumping || self.is_jet() {
            return false;
        }
        self.vel_y = tuning.player.jump_force;
        self.jumping = true;
        true
    }

    /// Fire one missile from the muzzle and start the cooldown.
    ///
    /// No-op for the Skater or while cooling down.
    pub fn fire_missile(&mut self, tuning: &Tuning) -> Option<u32> {
        if !self.can_fire() {
            return None;
        }

        let muzzle = &tuning.player.muzzle;
        let offset_x = if self.direction > 0.0 {
            muzzle.forward_x
        } else {
            muzzle.backward_x
        };
        let pos = Vec2::new(self.pos.x + offset_x, self.pos.y + muzzle.y);

        let id = self.next_missile_id;
        self.next_missile_id += 1;
        self.missiles
            .push(Missile::new(id, pos, self.direction, &tuning.missile));
        self.fire_cooldown_ms = tuning.player.fire_cooldown_ms;
        Some(id)
    }

    /// Tank -> Jet. Velocities reset, position kept.
    pub fn transform_to_jet(&mut self) -> bool {
        if !self.is_tank() {
            return false;
        }
        self.morph = MorphState::Jet;
        self.speed = 0.0;
        self.vel_y = 0.0;
        true
    }

    /// Advance one tick: intents, physics, morph timer and own missiles
    pub fn update(&mut self, input: &TickInput, tuning: &Tuning) -> PlayerStep {
        let mut step = PlayerStep::default();

        self.fire_cooldown_ms = self.fire_cooldown_ms.saturating_sub(tuning.tick_ms);

        // One-shot actions read at the start of the tick
        if input.transform && self.transform_to_jet() {
            step.morphed = Some(MorphState::Jet);
        }
        if input.up && !self.is_jet() {
            self.jump(tuning);
        }
        if input.fire {
            step.fired = self.fire_missile(tuning);
        }

        self.integrate_horizontal(input, tuning);
        self.integrate_vertical(input, tuning);

        self.morph_elapsed_ms = self.morph_elapsed_ms.saturating_add(tuning.tick_ms);
        if self.is_skater() && self.morph_elapsed_ms >= tuning.player.morph_duration_ms {
            self.morph = MorphState::Tank;
            step.morphed = Some(MorphState::Tank);
        }

        self.missiles.retain(|m| m.active);
        for missile in &mut self.missiles {
            missile.update(tuning.world.width);
        }

        self.advance_animation(tuning);

        step
    }

    fn advance_animation(&mut self, tuning: &Tuning) {
        self.anim_ticks += 1;
        if self.anim_ticks >= tuning.player.anim_ticks_per_frame.max(1) {
            self.anim_ticks = 0;
            self.anim_frame = (self.anim_frame + 1) % tuning.player.anim_frames.max(1);
        }
    }

    fn integrate_horizontal(&mut self, input: &TickInput, tuning: &Tuning) {
        let p = &tuning.player;
        let max_speed = if self.is_jet() {
            p.jet_max_speed
        } else {
            p.max_speed
        };

        if input.left {
            self.speed = (self.speed - p.acceleration).max(-max_speed);
            self.direction = -1.0;
        } else if input.right {
            self.speed = (self.speed + p.acceleration).min(max_speed);
            self.direction = 1.0;
        } else if self.speed > 0.0 {
            self.speed = (self.speed - p.deceleration).max(0.0);
        } else if self.speed < 0.0 {
            self.speed = (self.speed + p.deceleration).min(0.0);
        }

        self.pos.x += self.speed;

        // Walls stop the player dead
        let max_x = (tuning.world.width - self.size.x).max(0.0);
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.speed = 0.0;
        }
        if self.pos.x > max_x {
            self.pos.x = max_x;
            self.speed = 0.0;
        }
    }

    fn integrate_vertical(&mut self, input: &TickInput, tuning: &Tuning) {
        let p = &tuning.player;
        let world = &tuning.world;

        if self.is_jet() {
            self.vel_y = if input.up {
                -p.jet_climb_speed
            } else if input.down {
                p.jet_climb_speed
            } else if self.pos.y > world.ground_level - p.jet_hover_margin {
                -p.jet_hover_lift
            } else {
                0.0
            };
        } else {
            self.vel_y += p.gravity;
        }

        self.pos.y += self.vel_y;

        if self.pos.y > world.ground_level {
            self.pos.y = world.ground_level;
            self.vel_y = 0.0;
            self.jumping = false;
        }

        if self.is_jet() && self.pos.y < world.jet_ceiling {
            self.pos.y = world.jet_ceiling;
            self.vel_y = 0.0;
        }
    }

    /// Remove every missile touching `enemy`, replacing the enemy after each hit.
    ///
    /// `respawn` receives whether the player is currently a Jet. Returns the
    /// number of enemies destroyed.
    pub fn resolve_missile_hits(
        &mut self,
        enemy: &mut Enemy,
        mut respawn: impl FnMut(bool) -> Enemy,
    ) -> u32 {
        let is_jet = self.is_jet();
        let mut kills = 0;
        self.missiles.retain(|missile| {
            if missile.active && enemy.check_collision(missile) {
                *enemy = respawn(is_jet);
                kills += 1;
                false
            } else {
                true
            }
        });
        kills
    }
}
