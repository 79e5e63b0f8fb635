//! A simple built-in player used when no input script is given.
//!
//! Aims at the nearest enemy and fires, backs off when something gets
//! close, and closes distance when everything is far away.

use glam::DVec2;

use skirmish_core::commands::InputIntent;
use skirmish_core::state::Snapshot;

/// Back away from enemies nearer than this.
const KEEP_AWAY: f64 = 110.0;

/// Walk toward the nearest enemy when it is farther than this.
const CLOSE_IN: f64 = 260.0;

/// Choose this tick's intent from the last published snapshot.
pub fn steer(snapshot: &Snapshot) -> InputIntent {
    let player = snapshot.player.position;
    let nearest = snapshot
        .enemies
        .iter()
        .map(|e| (e.position, e.position.distance(player)))
        .min_by(|a, b| a.1.total_cmp(&b.1));

    let Some((target, distance)) = nearest else {
        return InputIntent::idle();
    };

    let toward = target - player;
    let travel = if distance < KEEP_AWAY {
        -toward
    } else if distance > CLOSE_IN {
        toward
    } else {
        DVec2::ZERO
    };

    InputIntent {
        move_right: travel.x > 1.0,
        move_left: travel.x < -1.0,
        move_up: travel.y > 1.0,
        move_down: travel.y < -1.0,
        aim: Some(toward),
        fire: true,
        ..InputIntent::idle()
    }
}
