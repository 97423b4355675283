//! Read-only frame view handed to renderers and input sources

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, SpawnSide};
use super::missile::Missile;
use super::player::{MorphState, Player};
use super::state::{GameState, World};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub morph: MorphState,
    pub direction: f32,
    pub speed: f32,
    pub vel_y: f32,
    pub airborne: bool,
    pub can_fire: bool,
    pub anim_frame: u8,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            pos: player.pos,
            size: player.size,
            morph: player.morph,
            direction: player.direction,
            speed: player.speed,
            vel_y: player.vel_y,
            airborne: player.jumping,
            can_fire: player.can_fire(),
            anim_frame: player.anim_frame,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub side: SpawnSide,
}

impl From<&Enemy> for EnemyView {
    fn from(enemy: &Enemy) -> Self {
        Self {
            id: enemy.id,
            pos: enemy.pos,
            size: enemy.size,
            side: enemy.side,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissileView {
    pub pos: Vec2,
    pub size: Vec2,
    pub direction: f32,
}

impl From<&Missile> for MissileView {
    fn from(missile: &Missile) -> Self {
        Self {
            pos: missile.pos,
            size: missile.size,
            direction: missile.direction,
        }
    }
}

/// Everything a frame needs to draw, detached from the live state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub world: World,
    pub player: PlayerView,
    pub enemy: EnemyView,
    /// Active missiles only
    pub missiles: Vec<MissileView>,
    pub score: u64,
    pub survival_ms: u64,
    pub game_over: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            tick: state.time_ticks,
            world: state.tuning.world.clone(),
            player: PlayerView::from(&state.player),
            enemy: EnemyView::from(&state.enemy),
            missiles: state
                .player
                .missiles
                .iter()
                .filter(|m| m.active)
                .map(MissileView::from)
                .collect(),
            score: state.score,
            survival_ms: state.survival_ms,
            game_over: state.game_over,
        }
    }
}
