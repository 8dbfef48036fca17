//! Duel Pong headless runner
//!
//! Drives the simulation at a fixed 60 Hz from an optional input tape and
//! logs what happens. Rendering is left to whatever front end embeds the
//! library; this binary exists for replays and quick rule checks.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use duel_pong::Config;
use duel_pong::consts::FRAME_DT;
use duel_pong::sim::{
    FrameInput, GameEvent, GamePhase, GameState, InputEvent, SeededRandom, ServeRandom, tick,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Headless Duel Pong runner", long_about = None)]
struct Cli {
    /// JSON config file; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON input tape with one list of events per frame
    #[arg(long)]
    tape: Option<PathBuf>,

    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many frames
    #[arg(long, default_value_t = 60 * 60 * 10)]
    max_frames: u64,

    /// Print the final snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

/// Recorded inputs, one entry per frame
#[derive(Debug, Default, Deserialize)]
struct InputTape {
    frames: Vec<Vec<InputEvent>>,
}

impl InputTape {
    fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read tape {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("malformed tape {}", path.display()))
    }
}

/// Presses whatever keeps the match moving once the tape runs out
fn auto_input(phase: GamePhase) -> FrameInput {
    let event = match phase {
        GamePhase::Start => InputEvent::StartPressed,
        GamePhase::Serve { .. } => InputEvent::ServePressed,
        GamePhase::Paused => InputEvent::PausePressed,
        GamePhase::Playing | GamePhase::GameOver { .. } => return FrameInput::default(),
    };
    FrameInput::default().with(event)
}

fn log_event(frame: u64, event: &GameEvent) {
    match event {
        GameEvent::WallBounce => log::trace!("[{frame}] wall bounce"),
        GameEvent::PaddleHit { side, speed } => {
            log::debug!("[{frame}] {} paddle hit at {speed:.1}", side.as_str())
        }
        GameEvent::PointScored { scorer, score } => log::info!(
            "[{frame}] point {} -> {}-{}",
            scorer.as_str(),
            score.left,
            score.right
        ),
        GameEvent::MatchWon { winner } => {
            log::info!("[{frame}] {} player wins", winner.as_str())
        }
        other => log::debug!("[{frame}] {other:?}"),
    }
}

fn run(cli: Cli) -> Result<()> {

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let tape = match &cli.tape {
        Some(path) => InputTape::load(path)?,
        None => InputTape::default(),
    };
    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("Duel Pong (headless) seed {seed}");

    let mut rng = SeededRandom::new(seed);
    let first_serve = rng.serve_side();
    let mut state = GameState::new(config, first_serve)?;

    for frame in 0..cli.max_frames {
        let input = match tape.frames.get(frame as usize) {
            Some(events) => FrameInput::from_events(events),
            None => auto_input(state.phase),
        };
        tick(&mut state, &input, FRAME_DT, &mut rng);
        for event in &state.events {
            log_event(state.frame, event);
        }

        if frame as usize >= tape.frames.len() && state.winner().is_some() {
            break;
        }
    }

    log::info!(
        "Stopped after {} frames: {:?}, score {}-{}",
        state.frame,
        state.phase,
        state.score.left,
        state.score.right
    );

    if cli.snapshot {
        let json = state
            .snapshot()
            .to_json()
            .context("failed to serialize snapshot")?;
        println!("{json}");
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run(Cli::parse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "duel-pong",
            "--seed",
            "7",
            "--max-frames",
            "120",
            "--snapshot",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.max_frames, 120);
        assert!(cli.snapshot);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_rejects_bad_seed() {
        assert!(Cli::try_parse_from(["duel-pong", "--seed", "abc"]).is_err());
    }

    #[test]
    fn test_auto_input_drives_match() {
        assert!(auto_input(GamePhase::Start).start);
        assert!(auto_input(GamePhase::Serve { reset_pending: false }).serve);
        assert_eq!(auto_input(GamePhase::Playing), FrameInput::default());
    }
}
