//! Player fire control: weapon cooldown and energy cost.

use skirmish_core::events::GameEvent;
use skirmish_core::types::ActorId;
use skirmish_core::weapons::Weapon;

use crate::registry::Registry;
use crate::world_setup;

/// Count down the weapon cooldown and fire if requested and ready.
pub fn run(registry: &mut Registry, weapons: &[Weapon], fire: bool, events: &mut Vec<GameEvent>) {
    let player = registry.player_mut();
    player.weapon_cooldown = player.weapon_cooldown.saturating_sub(1);

    if !fire || player.weapon_cooldown > 0 {
        return;
    }
    let Some(weapon) = weapons.get(player.weapon) else {
        return;
    };

    // An empty click still costs a cooldown so the event is not spammed.
    player.weapon_cooldown = weapon.cooldown_ticks();
    if !player.energy.try_spend(weapon.energy_cost) {
        events.push(GameEvent::OutOfEnergy);
        return;
    }

    let (origin, radius, facing) = (player.position, player.radius, player.facing);
    let projectile_id =
        world_setup::spawn_player_projectile(registry, weapon, origin, radius, facing);
    events.push(GameEvent::ShotFired {
        projectile_id,
        shooter: ActorId::Player,
    });
}
