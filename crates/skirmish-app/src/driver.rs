//! Input sources and the headless run loop.

use skirmish_core::commands::InputIntent;
use skirmish_core::enums::SessionPhase;
use skirmish_core::events::TerminalEvent;
use skirmish_core::state::Snapshot;
use skirmish_sim::SimulationEngine;

use crate::autopilot;
use crate::script::InputScript;

/// Where per-tick input comes from.
#[derive(Debug, Clone)]
pub enum Driver {
    Script(InputScript),
    Autopilot,
}

impl Driver {
    pub fn intent(&self, tick: u64, last: Option<&Snapshot>) -> InputIntent {
        match self {
            Driver::Script(script) => script.intent_at(tick),
            Driver::Autopilot => last.map(autopilot::steer).unwrap_or_default(),
        }
    }
}

/// Result of a headless run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ticks: u64,
    pub terminal: Option<TerminalEvent>,
    pub last: Option<Snapshot>,
}

/// Tick the engine as fast as possible until the session ends or
/// `max_ticks` calls have been made.
pub fn run_headless(engine: &mut SimulationEngine, driver: &Driver, max_ticks: u64) -> RunSummary {
    let mut last: Option<Snapshot> = None;
    let mut ticks = 0;

    for call in 0..max_ticks {
        let intent = driver.intent(call, last.as_ref());
        let snapshot = engine.tick(intent);
        ticks = call + 1;
        let ended = snapshot.phase == SessionPhase::Ended;
        last = Some(snapshot);
        if ended {
            break;
        }
    }

    RunSummary {
        ticks,
        terminal: engine.terminal_event(),
        last,
    }
}
