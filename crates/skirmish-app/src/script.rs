//! Scripted input: a list of tick ranges, each holding one intent.
//!
//! Segments are half-open `[from_tick, to_tick)`. Where segments overlap,
//! the later one wins. Ticks outside every segment get an idle intent.

use serde::{Deserialize, Serialize};

use skirmish_core::commands::InputIntent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptSegment {
    pub from_tick: u64,
    pub to_tick: u64,
    #[serde(default)]
    pub intent: InputIntent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputScript {
    pub segments: Vec<ScriptSegment>,
}

impl InputScript {
    pub fn intent_at(&self, tick: u64) -> InputIntent {
        self.segments
            .iter()
            .rev()
            .find(|s| s.from_tick <= tick && tick < s.to_tick)
            .map(|s| s.intent)
            .unwrap_or_default()
    }

    /// First tick after the last segment.
    pub fn end_tick(&self) -> u64 {
        self.segments.iter().map(|s| s.to_tick).max().unwrap_or(0)
    }
}
