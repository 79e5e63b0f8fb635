//! Input resolution: weapon selection, facing and player velocity.
//!
//! The pause toggle is handled by the engine before this runs.

use glam::DVec2;

use skirmish_core::commands::InputIntent;
use skirmish_core::events::GameEvent;
use skirmish_core::geometry::normalize_or;
use skirmish_core::weapons::Weapon;

use crate::registry::Registry;

/// Apply one tick of intent to the player. Returns whether fire was requested.
pub fn run(
    registry: &mut Registry,
    intent: &InputIntent,
    weapons: &[Weapon],
    events: &mut Vec<GameEvent>,
) -> bool {
    let player = registry.player_mut();

    if let Some(index) = intent.select_weapon {
        if index < weapons.len() && index != player.weapon {
            player.weapon = index;
            events.push(GameEvent::WeaponSelected { index });
        }
    }

    let axis = intent.movement_axis();
    let direction = normalize_or(axis, DVec2::ZERO);
    player.velocity = direction * player.speed;

    // Aim wins over movement direction; a zero aim keeps the old facing.
    if let Some(aim) = intent.aim {
        player.facing = normalize_or(aim, player.facing);
    } else if direction != DVec2::ZERO {
        player.facing = direction;
    }

    intent.fire
}
