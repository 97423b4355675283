//! Morph Strike - A skater/tank/jet arcade combat simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, morphing, missiles, pursuit)
//! - `tuning`: Data-driven game balance
//! - `platform`: Input source and renderer seams with headless adapters
//! - `game_loop`: Fixed-cadence driver owning the session

pub mod error;
pub mod game_loop;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::Error;
pub use game_loop::GameLoop;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulated milliseconds per tick (one animation frame at ~60 Hz)
    pub const TICK_MS: u32 = 16;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta accepted by the accumulator
    pub const MAX_FRAME_MS: f32 = 250.0;
}

/// Format a survival duration as `MM:SS`
pub fn format_survival(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
