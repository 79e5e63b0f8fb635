//! State shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use skirmish_core::commands::InputIntent;
use skirmish_core::events::TerminalEvent;
use skirmish_core::state::Snapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum GameLoopCommand {
    /// Input held from now on. Pause and weapon selection apply once.
    Input(InputIntent),
    Pause,
    Resume,
    /// Cancel the session without a terminal event, then exit the loop.
    Stop,
    /// Wall-clock speed multiplier. Does not change the simulated timestep.
    SetTimeScale(f64),
    /// Exit the loop, leaving the session as it is.
    Shutdown,
}

/// Shared application state.
///
/// - `mpsc::Sender` is wrapped in a `Mutex` so the state is `Sync`
/// - the latest snapshot is shared with the game loop thread
pub struct AppState {
    /// `None` until the loop is started.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<Snapshot>>>,
    /// Receives the terminal event, once.
    pub terminal_rx: Mutex<Option<mpsc::Receiver<TerminalEvent>>>,
    /// True while the loop thread is alive; cleared by the thread on exit.
    pub running: Arc<Mutex<bool>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            terminal_rx: Mutex::new(None),
            running: Arc::new(Mutex::new(false)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a command to the loop. Returns false if the loop is not running.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        let Ok(lock) = self.command_tx.lock() else {
            return false;
        };
        lock.as_ref().is_some_and(|tx| tx.send(command).is_ok())
    }

    pub fn is_running(&self) -> bool {
        self.running.lock().is_ok_and(|running| *running)
    }

    /// Clone of the most recent snapshot.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!state.is_running());
        assert!(!state.send(GameLoopCommand::Pause));
    }
}
