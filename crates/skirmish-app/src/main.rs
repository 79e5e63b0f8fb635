//! `skirmish`: run an arena session from the command line.
//!
//! Prints the terminal event (or the final score, if the tick limit is hit
//! first) as JSON on stdout. Logs go to stderr via tracing.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use skirmish_core::config::{Difficulty, SessionConfig};
use skirmish_core::enums::{DifficultyLevel, GameMode};
use skirmish_sim::scenario::build_config;
use skirmish_sim::SimulationEngine;

use skirmish_app::config::{load_script, load_session_config};
use skirmish_app::driver::{run_headless, Driver};
use skirmish_app::game_loop::{spawn_game_loop, TICK_DURATION};
use skirmish_app::state::{AppState, GameLoopCommand};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Skirmish,
    Survival,
    Siege,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Skirmish => GameMode::Skirmish,
            ModeArg::Survival => GameMode::Survival,
            ModeArg::Siege => GameMode::Siege,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Normal,
    Hard,
}

impl From<DifficultyArg> for DifficultyLevel {
    fn from(level: DifficultyArg) -> Self {
        match level {
            DifficultyArg::Easy => DifficultyLevel::Easy,
            DifficultyArg::Normal => DifficultyLevel::Normal,
            DifficultyArg::Hard => DifficultyLevel::Hard,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "skirmish", about = "Run a headless arena combat session")]
struct Args {
    /// Session configuration file (TOML). Overrides --mode.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "skirmish")]
    mode: ModeArg,
    /// Difficulty preset. Applied on top of --config when given.
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    starting_wave: Option<u32>,
    /// Maximum ticks to run.
    #[arg(long, default_value_t = 60 * 600)]
    ticks: u64,
    /// JSON input script. Without one the autopilot plays.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Run on the 60Hz loop thread instead of as fast as possible.
    #[arg(long)]
    realtime: bool,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn session_config(args: &Args) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = load_session_config(path)
                .with_context(|| format!("loading session config {}", path.display()))?;
            if let Some(level) = args.difficulty {
                config.difficulty = Difficulty::preset(level.into());
            }
            config
        }
        None => build_config(
            args.mode.into(),
            args.difficulty.unwrap_or(DifficultyArg::Normal).into(),
        ),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(wave) = args.starting_wave {
        config.starting_wave = wave;
    }
    Ok(config)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = session_config(&args)?;
    let driver = match &args.script {
        Some(path) => Driver::Script(
            load_script(path).with_context(|| format!("loading script {}", path.display()))?,
        ),
        None => Driver::Autopilot,
    };
    tracing::info!(seed = config.seed, victory = ?config.victory, "starting session");
    let engine = SimulationEngine::new(config).context("invalid session configuration")?;

    let output = if args.realtime {
        run_realtime(engine, &driver, args.ticks)?
    } else {
        run_headless_session(engine, &driver, args.ticks)?
    };
    println!("{output}");
    Ok(())
}

fn run_headless_session(
    mut engine: SimulationEngine,
    driver: &Driver,
    ticks: u64,
) -> Result<String> {
    let summary = run_headless(&mut engine, driver, ticks);
    match summary.terminal {
        Some(terminal) => Ok(serde_json::to_string_pretty(&terminal)?),
        None => {
            tracing::info!(ticks = summary.ticks, "tick limit reached");
            let score = summary.last.map(|s| s.score).unwrap_or_default();
            Ok(serde_json::to_string_pretty(&score)?)
        }
    }
}

/// Drive the loop thread from this thread, feeding it one intent per tick.
fn run_realtime(engine: SimulationEngine, driver: &Driver, ticks: u64) -> Result<String> {
    let state = AppState::new();
    let handle = spawn_game_loop(engine, &state);

    let mut terminal = None;
    for tick in 0..ticks {
        let last = state.snapshot();
        state.send(GameLoopCommand::Input(driver.intent(tick, last.as_ref())));
        std::thread::sleep(TICK_DURATION);

        let received = state
            .terminal_rx
            .lock()
            .ok()
            .and_then(|rx| rx.as_ref().and_then(|rx| rx.try_recv().ok()));
        if received.is_some() {
            terminal = received;
            break;
        }
    }

    state.send(GameLoopCommand::Shutdown);
    if handle.join().is_err() {
        anyhow::bail!("game loop thread panicked");
    }

    match terminal {
        Some(terminal) => Ok(serde_json::to_string_pretty(&terminal)?),
        None => {
            let score = state.snapshot().map(|s| s.score).unwrap_or_default();
            Ok(serde_json::to_string_pretty(&score)?)
        }
    }
}
