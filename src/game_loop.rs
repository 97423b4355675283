//! Fixed-cadence driver
//!
//! Owns the session, turns frame deltas into whole ticks and handles restart.
//! Tests call `step` directly instead of relying on a frame scheduler.

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS};
use crate::error::Error;
use crate::platform::{InputSource, Renderer};
use crate::sim::{GameState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

pub struct GameLoop {
    state: GameState,
    accumulator_ms: f32,
    /// Restart requested by a frame that has not run a tick yet
    pending_restart: bool,
    running: bool,
    /// Sessions started so far, including the current one
    runs: u32,
}

impl GameLoop {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::new(seed, tuning),
            accumulator_ms: 0.0,
            pending_restart: false,
            running: false,
            runs: 1,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Mark the loop as running. Calling it again does nothing.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            log::info!("Game loop running");
        }
    }

    /// Begin a new session and make sure the loop runs
    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
        self.new_session();
    }

    /// Restart without touching the frame accumulator
    fn new_session(&mut self) {
        self.state.reset();
        self.pending_restart = false;
        self.runs += 1;
        self.start();
    }

    /// Run exactly one tick. A restart request while the game is over
    /// starts a new session first.
    pub fn step(&mut self, input: &TickInput) -> &GameState {
        self.start();
        if self.state.game_over && input.restart {
            log::info!("Restart requested");
            self.new_session();
        }
        tick(&mut self.state, input);
        &self.state
    }

    /// Feed a frame delta and run as many whole ticks as it covers.
    ///
    /// Returns how many ticks ran. A restart request is held until a tick
    /// runs and only applies to the first of them. Non-finite deltas count
    /// as zero.
    pub fn advance(&mut self, frame_ms: f32, input: &TickInput) -> u32 {
        let tick_ms = self.state.tuning.tick_ms as f32;
        let frame_ms = if frame_ms.is_finite() {
            frame_ms.clamp(0.0, MAX_FRAME_MS)
        } else {
            0.0
        };
        self.accumulator_ms += frame_ms;
        self.pending_restart |= input.restart;

        let mut input = input.clone();
        let mut substeps = 0;
        while self.accumulator_ms >= tick_ms && substeps < MAX_SUBSTEPS {
            input.restart = self.pending_restart;
            self.step(&input);
            self.accumulator_ms -= tick_ms;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending_restart = false;
        }

        // Drop backlog the substep cap could never catch up on
        self.accumulator_ms = self.accumulator_ms.min(tick_ms * MAX_SUBSTEPS as f32);
        substeps
    }

    /// Drive `frames` ticks: poll input, step, present.
    pub fn run(
        &mut self,
        input: &mut impl InputSource,
        renderer: &mut impl Renderer,
        frames: u64,
    ) -> Result<Snapshot, Error> {
        self.start();
        for _ in 0..frames {
            let intent = input.next_intent(&self.snapshot());
            self.step(&intent);
            renderer.present(&self.snapshot())?;
        }
        Ok(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Autopilot, NullRenderer, ScriptedInput};
    use crate::sim::{MorphState, SpawnSide};
    use glam::Vec2;

    /// Player mid-screen, enemy parked off-screen
    fn quiet_game(seed: u64) -> GameLoop {
        let mut game = GameLoop::new(seed, Tuning::default());
        game.state.player.pos.x = 300.0;
        game.state.enemy.speed = 0.0;
        game
    }

    /// Put the enemy on top of the player so the next tick ends the game
    fn force_game_over(game: &mut GameLoop) {
        let pos = game.state.player.pos;
        game.state.enemy.pos = Vec2::new(pos.x, pos.y - 10.0);
        game.state.enemy.speed = 0.0;
        game.step(&TickInput::default());
        assert!(game.state().game_over);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut game = GameLoop::new(1, Tuning::default());
        assert!(!game.is_running());
        game.start();
        game.start();
        assert!(game.is_running());
        game.reset();
        assert!(game.is_running());
    }

    #[test]
    fn test_step_runs_one_tick() {
        let mut game = quiet_game(1);
        assert_eq!(game.step(&TickInput::default()).time_ticks, 1);
        assert_eq!(game.step(&TickInput::default()).time_ticks, 2);
    }

    #[test]
    fn test_advance_accumulates_partial_frames() {
        let mut game = quiet_game(2);
        let idle = TickInput::default();

        assert_eq!(game.advance(10.0, &idle), 0);
        assert_eq!(game.advance(10.0, &idle), 1);
        assert_eq!(game.advance(28.0, &idle), 2);
        assert_eq!(game.state().time_ticks, 3);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut game = quiet_game(2);
        let ran = game.advance(10_000.0, &TickInput::default());
        assert_eq!(ran, MAX_SUBSTEPS);
    }

    #[test]
    fn test_nan_frame_does_not_stall_loop() {
        let mut game = quiet_game(2);
        let idle = TickInput::default();
        assert_eq!(game.advance(f32::NAN, &idle), 0);
        assert_eq!(game.advance(f32::INFINITY, &idle), 0);
        assert!(game.accumulator_ms.is_finite());
        assert_eq!(game.advance(200.0, &idle), MAX_SUBSTEPS);
    }

    #[test]
    fn test_accumulator_backlog_is_bounded() {
        let mut game = quiet_game(2);
        let idle = TickInput::default();
        let tick_ms = game.state().tuning.tick_ms as f32;
        let cap = tick_ms * MAX_SUBSTEPS as f32;

        for _ in 0..50 {
            assert_eq!(game.advance(MAX_FRAME_MS, &idle), MAX_SUBSTEPS);
            assert!(game.accumulator_ms <= cap);
        }
        // Backlog drains within one capped frame plus the next
        assert_eq!(game.advance(0.0, &idle), MAX_SUBSTEPS);
        assert!(game.accumulator_ms < tick_ms);
        assert_eq!(game.advance(0.0, &idle), 0);
    }

    #[test]
    fn test_restart_survives_short_frame() {
        let mut game = quiet_game(8);
        game.state.score = 700;
        force_game_over(&mut game);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        let idle = TickInput::default();

        // Too short for a tick: the request must be kept
        assert_eq!(game.advance(10.0, &restart), 0);
        assert!(game.state().game_over);
        assert_eq!(game.runs(), 1);

        assert_eq!(game.advance(10.0, &idle), 1);
        assert_eq!(game.runs(), 2);
        let state = game.state();
        assert_eq!(state.score, 0);
        assert_eq!(state.player.morph, MorphState::Skater);
        assert_eq!(state.time_ticks, 1);

        // Consumed: a later game over is not restarted without a new request
        force_game_over(&mut game);
        assert_eq!(game.advance(32.0, &idle), 2);
        assert!(game.state().game_over);
        assert_eq!(game.runs(), 2);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut game = quiet_game(3);
        game.step(&TickInput::default());
        game.state.score = 300;
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        game.step(&restart);
        assert_eq!(game.state().score, 300);
        assert_eq!(game.runs(), 1);
    }

    #[test]
    fn test_restart_after_game_over_resets_session() {
        let mut game = GameLoop::new(4, Tuning::default());
        game.state.score = 500;
        game.state.player.morph = MorphState::Jet;
        force_game_over(&mut game);

        // Without the restart signal nothing changes
        let frozen = game.state().survival_ms;
        game.step(&TickInput::default());
        assert_eq!(game.state().survival_ms, frozen);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        let state = game.step(&restart);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.morph, MorphState::Skater);
        assert_eq!(state.time_ticks, 1);
        assert!(matches!(state.enemy.side, SpawnSide::Left | SpawnSide::Right));
        assert_eq!(game.runs(), 2);
    }

    #[test]
    fn test_reset_after_completed_game() {
        let mut game = GameLoop::new(7, Tuning::default());
        game.state.score = 1200;
        force_game_over(&mut game);

        game.reset();
        let state = game.state();
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.survival_ms, 0);
        assert_eq!(state.player.morph, MorphState::Skater);
        assert_eq!(state.player.pos.y, state.tuning.world.ground_level);
        assert!(state.enemy.pos.x < 0.0 || state.enemy.pos.x >= state.tuning.world.width);
        assert!(game.is_running());
    }

    #[test]
    fn test_run_with_scripted_input() {
        let mut game = GameLoop::new(5, Tuning::default());
        game.state.enemy.speed = 0.0;
        game.state.enemy.pos = Vec2::new(-500.0, 0.0);
        let start_x = game.state().player.pos.x;

        let mut input = ScriptedInput::default().then(
            10,
            TickInput {
                right: true,
                ..Default::default()
            },
        );
        let view = game.run(&mut input, &mut NullRenderer, 10).unwrap();
        assert_eq!(view.tick, 10);
        assert!(view.player.pos.x > start_x || view.player.pos.x == 740.0);
    }

    #[test]
    fn test_autopilot_session_keeps_invariants() {
        let mut game = GameLoop::new(6, Tuning::default());
        let mut bot = Autopilot::default();
        let mut renderer = NullRenderer;
        let max_x = game.state().tuning.world.width - game.state().tuning.player.width;

        for _ in 0..3000 {
            let intent = bot.next_intent(&game.snapshot());
            let state = game.step(&intent);
            assert!(state.player.pos.x >= 0.0 && state.player.pos.x <= max_x);
            assert_eq!(state.score, u64::from(state.kills) * state.tuning.kill_bounty);
            renderer.present(&game.snapshot()).unwrap();
        }
    }
}
