//! Player movement integration.

use skirmish_core::arena::Arena;
use skirmish_core::constants::DT;
use skirmish_core::types::ActorId;

use crate::registry::Registry;
use crate::systems::collision::{probe_move, BlockedMove};

/// Advance the player by its velocity, probing obstacles and clamping to bounds.
pub fn run(registry: &mut Registry, arena: &Arena, blocked: &mut Vec<BlockedMove>) {
    let player = registry.player_mut();
    let proposed = player.position + player.velocity * DT;
    let moved = probe_move(arena, ActorId::Player, player.position, proposed, blocked);
    player.position = arena.bounds.clamp_inside(moved, player.radius);
}
