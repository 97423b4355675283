//! Input sources

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::sim::{MorphState, Snapshot, TickInput};

/// Produces the intent flags for the next tick
pub trait InputSource {
    fn next_intent(&mut self, view: &Snapshot) -> TickInput;
}

impl<T: InputSource + ?Sized> InputSource for Box<T> {
    fn next_intent(&mut self, view: &Snapshot) -> TickInput {
        (**self).next_intent(view)
    }
}

/// Hold `input` for `ticks` ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub ticks: u64,
    #[serde(default)]
    pub input: TickInput,
}

/// A fixed timeline of intents. Idle once the timeline runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    segments: Vec<Segment>,
    index: usize,
    elapsed: u64,
}

impl ScriptedInput {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            index: 0,
            elapsed: 0,
        }
    }

    /// Parse a JSON array of segments
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let segments: Vec<Segment> = serde_json::from_str(json)?;
        Ok(Self::new(segments))
    }

    /// Append a segment
    pub fn then(mut self, ticks: u64, input: TickInput) -> Self {
        self.segments.push(Segment { ticks, input });
        self
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.segments.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_intent(&mut self, _view: &Snapshot) -> TickInput {
        while let Some(segment) = self.segments.get(self.index) {
            if self.elapsed < segment.ticks {
                self.elapsed += 1;
                return segment.input.clone();
            }
            self.index += 1;
            self.elapsed = 0;
        }
        TickInput::default()
    }
}

/// Simple bot: becomes a jet as soon as it can, then lines up with the
/// enemy and keeps firing from a distance. Restarts after losing.
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Horizontal gap the bot tries to keep from the enemy
    pub standoff: f32,
    /// Vertical misalignment tolerated before firing
    pub aim_tolerance: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            standoff: 220.0,
            aim_tolerance: 20.0,
        }
    }
}

impl InputSource for Autopilot {
    fn next_intent(&mut self, view: &Snapshot) -> TickInput {
        let mut input = TickInput::default();
        if view.game_over {
            input.restart = true;
            return input;
        }

        let player = &view.player;
        let enemy = &view.enemy;
        let player_mid = player.pos.x + player.size.x / 2.0;
        let enemy_mid = enemy.pos.x + enemy.size.x / 2.0;
        let dx = enemy_mid - player_mid;
        let toward = dx.signum();
        let facing_enemy = player.direction == toward;

        match player.morph {
            MorphState::Skater => {
                // Run from the enemy and hop when it gets close
                if dx.abs() < self.standoff {
                    input.left = toward > 0.0;
                    input.right = toward < 0.0;
                    input.up = dx.abs() < self.standoff / 2.0;
                }
            }
            MorphState::Tank => {
                input.transform = true;
            }
            MorphState::Jet => {
                let dy = enemy.pos.y - player.pos.y;
                input.up = dy < -self.aim_tolerance;
                input.down = dy > self.aim_tolerance;

                if !facing_enemy || dx.abs() > self.standoff * 1.5 {
                    // Turn around or close in
                    input.left = toward < 0.0;
                    input.right = toward > 0.0;
                } else if dx.abs() < self.standoff / 2.0 {
                    input.left = toward > 0.0;
                    input.right = toward < 0.0;
                }

                input.fire =
                    player.can_fire && facing_enemy && dy.abs() <= self.aim_tolerance * 2.0;
            }
        }

        input
    }
}
