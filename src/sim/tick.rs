//! Fixed timestep simulation tick
//!
//! Core game step that advances the session deterministically.

use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::state::{GameState, next_id};

/// Intent flags for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Climb as a Jet, jump otherwise
    pub up: bool,
    /// Dive (Jet only)
    pub down: bool,
    pub fire: bool,
    /// Tank -> Jet
    pub transform: bool,
    /// Start a new session (only honored once the game is over)
    pub restart: bool,
}

/// Advance the game state by one tick. No-op once the game is over.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.game_over {
        return;
    }

    let tick_ms = state.tuning.tick_ms as u64;
    state.time_ticks += 1;
    state.survival_ms = state.time_ticks * tick_ms;

    // Enemy chases where the player was at the start of the tick
    state.enemy.update(state.player.pos);

    let step = state.player.update(input, &state.tuning);
    if let Some(form) = step.morphed {
        log::info!(
            "Player morphed into {} at tick {}",
            form.as_str(),
            state.time_ticks
        );
    }

    let GameState {
        player,
        enemy,
        rng,
        tuning,
        next_id: id_counter,
        ..
    } = &mut *state;
    let kills = player.resolve_missile_hits(enemy, |player_is_jet| {
        let fresh = Enemy::spawn_random(
            next_id(id_counter),
            player_is_jet,
            &tuning.world,
            &tuning.enemy,
            rng,
        );
        log::debug!("Enemy destroyed, respawning from {:?}", fresh.side);
        fresh
    });
    if kills > 0 {
        state.kills += kills;
        state.score += u64::from(kills) * state.tuning.kill_bounty;
        log::debug!("Score {} ({} kills)", state.score, state.kills);
    }

    if state
        .enemy
        .check_player_collision(state.player.pos, &state.tuning.player.hitbox)
    {
        state.game_over = true;
        log::info!(
            "Game over: score {}, survived {}",
            state.score,
            crate::format_survival(state.survival_ms)
        );
    }

    // Ensure deterministic ordering
    state.normalize_order();

    log::trace!(
        "tick {} player=({:.1},{:.1}) enemy=({:.1},{:.1}) missiles={}",
        state.time_ticks,
        state.player.pos.x,
        state.player.pos.y,
        state.enemy.pos.x,
        state.enemy.pos.y,
        state.player.missiles.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::SpawnSide;
    use crate::sim::player::MorphState;
    use crate::tuning::Tuning;
    use glam::Vec2;

    /// Session with the enemy parked far from the player
    fn quiet_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default());
        state.player.pos.x = 100.0;
        state.enemy = Enemy::new(1, SpawnSide::Right, 300.0, &state.tuning.world, &state.tuning.enemy);
        state.enemy.speed = 0.0;
        state
    }

    fn make_tank(state: &mut GameState) {
        state.player.morph = MorphState::Tank;
        state.player.morph_elapsed_ms = state.tuning.player.morph_duration_ms;
    }

    #[test]
    fn test_survival_timer_advances() {
        let mut state = quiet_state(1);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.time_ticks, 10);
        assert_eq!(state.survival_ms, 160);
    }

    #[test]
    fn test_enemy_pursues_player() {
        let mut state = quiet_state(2);
        state.enemy.speed = state.tuning.enemy.speed;
        let before = state.enemy.pos.distance(state.player.pos);
        tick(&mut state, &TickInput::default());
        let after = state.enemy.pos.distance(state.player.pos);
        assert!(after < before);
    }

    #[test]
    fn test_skater_to_tank_through_tick() {
        let mut state = quiet_state(3);
        for _ in 0..124 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.morph, MorphState::Skater);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.morph, MorphState::Tank);
    }

    #[test]
    fn test_missile_kill_scores_and_respawns() {
        let mut state = quiet_state(4);
        make_tank(&mut state);
        state.player.pos = Vec2::new(100.0, 300.0);
        // Enemy sits right where the first missile will be after one step
        state.enemy.pos = Vec2::new(170.0, 260.0);
        let old_id = state.enemy.id;

        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire);

        assert_eq!(state.score, 100);
        assert_eq!(state.kills, 1);
        assert!(state.player.missiles.is_empty());
        assert_ne!(state.enemy.id, old_id);
        // Fresh enemy is off-screen on its side
        assert!(state.enemy.pos.x < 0.0 || state.enemy.pos.x >= state.tuning.world.width);
        assert!(!state.game_over);
    }

    #[test]
    fn test_player_collision_ends_game_once() {
        let mut state = quiet_state(5);
        state.enemy.pos = Vec2::new(state.player.pos.x, state.player.pos.y - 10.0);

        tick(&mut state, &TickInput::default());
        assert!(state.game_over);
        let survival = state.survival_ms;
        let pos = state.player.pos;
        let score = state.score;
        let ticks = state.time_ticks;

        let busy = TickInput {
            right: true,
            up: true,
            fire: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut state, &busy);
        }
        assert!(state.game_over);
        assert_eq!(state.survival_ms, survival);
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.score, score);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_jet_kill_respawns_in_sky() {
        let mut state = quiet_state(6);
        make_tank(&mut state);
        state.player.transform_to_jet();
        state.player.pos = Vec2::new(100.0, 200.0);
        state.enemy.pos = Vec2::new(170.0, 160.0);

        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire);
        assert_eq!(state.kills, 1);
        let world = &state.tuning.world;
        assert!(state.enemy.pos.y >= world.sky_level);
        assert!(state.enemy.pos.y < world.sky_level + world.sky_band);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut a = GameState::new(99999, Tuning::default());
        let mut b = GameState::new(99999, Tuning::default());

        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                up: true,
                fire: true,
                ..Default::default()
            },
            TickInput {
                left: true,
                transform: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..100 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player, b.player);
        assert_eq!(a.enemy, b.enemy);
        assert_eq!(a.score, b.score);
        assert_eq!(a.game_over, b.game_over);
    }
}
