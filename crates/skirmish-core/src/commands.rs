//! Per-tick input intent.
//!
//! The host collects whatever its input devices report into a single
//! `InputIntent`, which is passed by value into the tick pipeline and
//! resolved exactly once.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Everything the player asked for during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputIntent {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Desired facing direction. Need not be normalized; zero keeps the current facing.
    pub aim: Option<DVec2>,
    pub fire: bool,
    /// Toggle pause.
    pub pause: bool,
    /// Equip the weapon at this index of the session's weapon table.
    pub select_weapon: Option<usize>,
}

impl InputIntent {
    /// No input at all.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Only a pause toggle.
    pub fn pause() -> Self {
        Self {
            pause: true,
            ..Self::default()
        }
    }

    /// Sum of the pressed directions (opposite keys cancel). Not normalized.
    pub fn movement_axis(&self) -> DVec2 {
        let mut axis = DVec2::ZERO;
        if self.move_up {
            axis.y += 1.0;
        }
        if self.move_down {
            axis.y -= 1.0;
        }
        if self.move_right {
            axis.x += 1.0;
        }
        if self.move_left {
            axis.x -= 1.0;
        }
        axis
    }
}
