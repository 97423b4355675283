//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod missile;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use enemy::{Enemy, SpawnSide};
pub use missile::Missile;
pub use player::{MorphState, Player, PlayerStep};
pub use snapshot::{EnemyView, MissileView, PlayerView, Snapshot};
pub use state::{GameState, World};
pub use tick::{TickInput, tick};
