//! Projectile flight: integrate, age, record trails, expire.

use skirmish_core::arena::Arena;
use skirmish_core::components::{Body, ProjectileState, Trail};
use skirmish_core::constants::{DT, TRAIL_LENGTH};
use skirmish_core::types::ProjectileId;

use crate::registry::Registry;

/// Advance every live projectile one tick. Projectiles that outlive their
/// lifespan, leave the arena, or enter an obstacle are consumed and queued
/// for removal. Returns the number expired.
pub fn run(registry: &mut Registry, arena: &Arena) -> usize {
    let mut expired: Vec<ProjectileId> = Vec::new();

    for (_entity, (body, state, trail)) in registry
        .world_mut()
        .query_mut::<(&mut Body, &mut ProjectileState, &mut Trail)>()
    {
        if state.consumed {
            continue;
        }
        trail.record(body.position, TRAIL_LENGTH);
        body.velocity = state.direction * state.speed;
        body.position += body.velocity * DT;
        state.age_ticks += 1;

        let out_of_bounds = !arena.bounds.contains(body.position);
        let in_obstacle = arena.obstacle_at(body.position).is_some();
        if state.age_ticks >= state.lifespan_ticks || out_of_bounds || in_obstacle {
            state.consumed = true;
            expired.push(state.id);
        }
    }

    let count = expired.len();
    for id in expired {
        registry.mark_projectile_for_removal(id);
    }
    count
}
