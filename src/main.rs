//! Morph Strike headless runner
//!
//! Plays a session with the autopilot (or an intent script) and writes
//! frames to the log or as JSON lines on stdout.

use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use morph_strike::platform::{
    Autopilot, InputSource, JsonLinesRenderer, LogRenderer, Renderer, ScriptedInput,
};
use morph_strike::{GameLoop, Tuning, format_survival};

#[derive(Debug, Parser)]
#[command(name = "morph-strike", about = "Run a headless Morph Strike session")]
struct Args {
    /// RNG seed for the session
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    /// JSON file overriding balance values
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// JSON intent script to play instead of the autopilot
    #[arg(long)]
    script: Option<PathBuf>,
    /// Emit one JSON snapshot per tick on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Morph Strike (headless) starting...");

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let mut input: Box<dyn InputSource> = match &args.script {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading script {}", path.display()))?;
            Box::new(ScriptedInput::from_json_str(&json).context("parsing intent script")?)
        }
        None => Box::new(Autopilot::default()),
    };

    let mut renderer: Box<dyn Renderer> = if args.json {
        Box::new(JsonLinesRenderer::new(BufWriter::new(io::stdout().lock())))
    } else {
        Box::new(LogRenderer::default())
    };

    let mut game = GameLoop::new(args.seed, tuning);
    let last = game
        .run(&mut input, &mut renderer, args.frames)
        .context("running session")?;

    log::info!(
        "Finished after {} sessions: score {}, survival {}{}",
        game.runs(),
        last.score,
        format_survival(last.survival_ms),
        if last.game_over { " (game over)" } else { "" }
    );
    Ok(())
}
