//! Game loop thread. Runs the simulation engine at 60Hz.
//!
//! The engine is moved into the thread, which owns it from then on.
//! Commands arrive via `mpsc` channel. Snapshots are stored in shared
//! state for polling, and the terminal event is sent once over its own
//! channel.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use skirmish_core::commands::InputIntent;
use skirmish_core::constants::TICK_RATE;
use skirmish_core::enums::SessionPhase;
use skirmish_core::events::TerminalEvent;
use skirmish_core::state::Snapshot;
use skirmish_sim::SimulationEngine;

use crate::state::{AppState, GameLoopCommand};

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread and wires it into `state`.
///
/// Returns the thread handle; the loop exits on `Stop`, `Shutdown`, or when
/// every command sender is dropped.
pub fn spawn_game_loop(engine: SimulationEngine, state: &AppState) -> JoinHandle<()> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let (terminal_tx, terminal_rx) = mpsc::channel::<TerminalEvent>();
    let latest_snapshot = Arc::clone(&state.latest_snapshot);
    let running = Arc::clone(&state.running);
    set_running(&running, true);

    let handle = std::thread::Builder::new()
        .name("skirmish-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, terminal_tx, &latest_snapshot);
            set_running(&running, false);
        })
        .expect("Failed to spawn game loop thread");

    if let Ok(mut tx) = state.command_tx.lock() {
        *tx = Some(cmd_tx);
    }
    if let Ok(mut rx) = state.terminal_rx.lock() {
        *rx = Some(terminal_rx);
    }
    handle
}

/// The game loop. Runs until Stop/Shutdown or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    terminal_tx: mpsc::Sender<TerminalEvent>,
    latest_snapshot: &Mutex<Option<Snapshot>>,
) {
    let mut held = InputIntent::idle();
    let mut time_scale = 1.0_f64;
    let mut terminal_sent = false;
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands into this tick's intent
        let mut intent = held;
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Input(input)) => {
                    intent = merge_input(intent, input);
                    held = InputIntent {
                        pause: false,
                        select_weapon: None,
                        ..input
                    };
                }
                Ok(GameLoopCommand::Pause) => {
                    intent.pause = engine.phase() == SessionPhase::Active;
                }
                Ok(GameLoopCommand::Resume) => {
                    intent.pause = engine.phase() == SessionPhase::Paused;
                }
                Ok(GameLoopCommand::SetTimeScale(scale)) => {
                    time_scale = scale.clamp(0.0, 8.0);
                }
                Ok(GameLoopCommand::Stop) => {
                    engine.stop();
                    publish(latest_snapshot, engine.tick(InputIntent::idle()));
                    return;
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick(intent);

        // 3. Hand over the terminal event exactly once
        if !terminal_sent {
            if let Some(terminal) = snapshot.terminal {
                let _ = terminal_tx.send(terminal);
                terminal_sent = true;
            }
        }

        // 4. Store latest snapshot for polling
        publish(latest_snapshot, snapshot);

        // 5. Sleep until next tick, adjusting for time_scale
        let effective_tick_duration = if time_scale > 0.001 {
            TICK_DURATION.div_f64(time_scale)
        } else {
            TICK_DURATION
        };

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind, reset
            next_tick_time = now;
        }
    }
}

/// Take the new input, keeping a pause toggle or weapon pick already
/// queued this tick.
fn merge_input(queued: InputIntent, input: InputIntent) -> InputIntent {
    InputIntent {
        pause: queued.pause || input.pause,
        select_weapon: input.select_weapon.or(queued.select_weapon),
        ..input
    }
}

fn set_running(running: &Mutex<bool>, value: bool) {
    if let Ok(mut lock) = running.lock() {
        *lock = value;
    }
}

fn publish(latest_snapshot: &Mutex<Option<Snapshot>>, snapshot: Snapshot) {
    if let Ok(mut lock) = latest_snapshot.lock() {
        *lock = Some(snapshot);
    }
}
