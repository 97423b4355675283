//! Platform abstraction layer
//!
//! The simulation only sees intent flags coming in and snapshots going out:
//! - `InputSource` produces one `TickInput` per tick
//! - `Renderer` consumes a read-only `Snapshot` per tick
//!
//! Only headless adapters live here. Key binding, drawing and windowing are
//! owned by whichever front end embeds the crate.

pub mod input;
pub mod render;

pub use input::{Autopilot, InputSource, ScriptedInput, Segment};
pub use render::{JsonLinesRenderer, LogRenderer, NullRenderer, Renderer};
