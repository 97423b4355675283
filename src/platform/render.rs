//! Headless renderers

use std::io::Write;

use crate::error::Error;
use crate::sim::Snapshot;

/// Consumes one snapshot per tick. Never sees mutable simulation state.
pub trait Renderer {
    fn present(&mut self, view: &Snapshot) -> Result<(), Error>;
}

impl<T: Renderer + ?Sized> Renderer for Box<T> {
    fn present(&mut self, view: &Snapshot) -> Result<(), Error> {
        (**self).present(view)
    }
}

/// Discards every frame
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn present(&mut self, _view: &Snapshot) -> Result<(), Error> {
        Ok(())
    }
}

/// Writes frames to the log: every tick at trace level, game-over at info
#[derive(Debug, Default)]
pub struct LogRenderer {
    was_over: bool,
}

impl Renderer for LogRenderer {
    fn present(&mut self, view: &Snapshot) -> Result<(), Error> {
        log::trace!(
            "frame {} {} at ({:.1},{:.1}) score={} time={}",
            view.tick,
            view.player.morph.as_str(),
            view.player.pos.x,
            view.player.pos.y,
            view.score,
            crate::format_survival(view.survival_ms)
        );
        if view.game_over && !self.was_over {
            log::info!(
                "GAME OVER - score {} - survival {}",
                view.score,
                crate::format_survival(view.survival_ms)
            );
        }
        self.was_over = view.game_over;
        Ok(())
    }
}

/// Writes each frame as one line of JSON
#[derive(Debug)]
pub struct JsonLinesRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn present(&mut self, view: &Snapshot) -> Result<(), Error> {
        serde_json::to_writer(&mut self.out, view)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}
