//! Game state and world geometry
//!
//! `GameState` is the whole session: one player, one enemy, score and clocks.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::player::Player;
use super::snapshot::Snapshot;
use crate::tuning::Tuning;

/// World geometry, supplied when a session is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct World {
    pub width: f32,
    pub height: f32,
    /// Resting y for grounded players and enemies
    pub ground_level: f32,
    /// Top of the band enemies spawn in while the player flies
    pub sky_level: f32,
    /// Height of that band
    pub sky_band: f32,
    /// Lowest y (highest point on screen) a jet may reach
    pub jet_ceiling: f32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            ground_level: 300.0,
            sky_level: 150.0,
            sky_band: 200.0,
            jet_ceiling: 50.0,
        }
    }
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub player: Player,
    /// The single live enemy
    pub enemy: Enemy,
    pub score: u64,
    /// Enemies destroyed this session
    pub kills: u32,
    pub game_over: bool,
    /// Ticks since the session (re)started
    pub time_ticks: u64,
    /// Survival time in simulated ms, frozen once the game ends
    pub survival_ms: u64,
    pub(crate) rng: Pcg32,
    pub(crate) next_id: u32,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let player = spawn_player(&tuning, &mut rng);
        let enemy = Enemy::spawn_random(1, player.is_jet(), &tuning.world, &tuning.enemy, &mut rng);

        Self {
            seed,
            tuning,
            player,
            enemy,
            score: 0,
            kills: 0,
            game_over: false,
            time_ticks: 0,
            survival_ms: 0,
            rng,
            next_id: 2,
        }
    }

    /// Start over with a fresh player and enemy. The RNG stream continues,
    /// so each run gets a new layout.
    pub fn reset(&mut self) {
        self.score = 0;
        self.kills = 0;
        self.game_over = false;
        self.time_ticks = 0;
        self.survival_ms = 0;
        self.player = spawn_player(&self.tuning, &mut self.rng);
        self.enemy = self.spawn_enemy();
        log::info!(
            "Session reset: player at x={:.1}, enemy from {:?}",
            self.player.pos.x,
            self.enemy.side
        );
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        next_id(&mut self.next_id)
    }

    /// Build a replacement enemy for the player's current form
    pub fn spawn_enemy(&mut self) -> Enemy {
        let id = self.next_entity_id();
        Enemy::spawn_random(
            id,
            self.player.is_jet(),
            &self.tuning.world,
            &self.tuning.enemy,
            &mut self.rng,
        )
    }

    /// Read-only view for renderers and input sources
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// Ensure missiles are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.player.missiles.sort_by_key(|m| m.id);
    }
}

pub(crate) fn next_id(counter: &mut u32) -> u32 {
    let id = *counter;
    *counter += 1;
    id
}

fn spawn_player(tuning: &Tuning, rng: &mut impl Rng) -> Player {
    let span = (tuning.world.width - tuning.player.spawn_margin).max(0.0);
    let x = rng.random::<f32>() * span;
    Player::new(x, tuning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::MorphState;

    #[test]
    fn test_new_session() {
        let state = GameState::new(42, Tuning::default());
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert_eq!(state.player.morph, MorphState::Skater);
        assert!(state.player.pos.x >= 0.0 && state.player.pos.x < 700.0);
        assert_eq!(state.player.pos.y, state.tuning.world.ground_level);
        assert_eq!(state.enemy.pos.y, state.tuning.world.ground_level);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::new(9, Tuning::default());
        let b = GameState::new(9, Tuning::default());
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.enemy, b.enemy);
    }

    #[test]
    fn test_reset_clears_session() {
        let mut state = GameState::new(5, Tuning::default());
        state.score = 700;
        state.kills = 7;
        state.game_over = true;
        state.time_ticks = 900;
        state.survival_ms = 14_400;
        state.player.morph = MorphState::Jet;

        state.reset();
        assert_eq!(state.score, 0);
        assert_eq!(state.kills, 0);
        assert!(!state.game_over);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.survival_ms, 0);
        assert_eq!(state.player.morph, MorphState::Skater);
        assert!(state.player.missiles.is_empty());
        // Player was a Skater again when the enemy spawned
        assert_eq!(state.enemy.pos.y, state.tuning.world.ground_level);
    }

    #[test]
    fn test_spawned_enemy_follows_player_form() {
        let mut state = GameState::new(11, Tuning::default());
        state.player.morph = MorphState::Jet;
        let world = state.tuning.world.clone();
        for _ in 0..20 {
            let enemy = state.spawn_enemy();
            assert!(enemy.pos.y >= world.sky_level);
            assert!(enemy.pos.y < world.sky_level + world.sky_band);
        }
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(1, Tuning::default());
        let a = state.spawn_enemy().id;
        let b = state.spawn_enemy().id;
        assert_ne!(a, b);
        assert_ne!(a, state.enemy.id);
    }
}
