//! Enemy AI system.
//!
//! Builds an [`AiContext`] for each enemy, calls the FSM from skirmish-ai,
//! then applies the resulting state, movement and fire decision back to
//! the registry. Enemies are processed in ascending id order so wander
//! point sampling consumes the RNG deterministically.

use glam::DVec2;
use rand_chacha::ChaCha8Rng;

use skirmish_core::arena::Arena;
use skirmish_core::components::{Body, EnemyProfile, Health};
use skirmish_core::constants::{secs_to_ticks, DT};
use skirmish_core::events::GameEvent;
use skirmish_core::types::ActorId;

use skirmish_ai::fsm::{evaluate, AiContext};
use skirmish_ai::profiles::get_profile;
use skirmish_ai::wander::pick_wander_point;

use crate::registry::Registry;
use crate::systems::collision::{probe_move, BlockedMove};
use crate::world_setup;

/// Run the AI for every live enemy.
pub fn run(
    registry: &mut Registry,
    arena: &Arena,
    rng: &mut ChaCha8Rng,
    current_tick: u64,
    blocked: &mut Vec<BlockedMove>,
    events: &mut Vec<GameEvent>,
) {
    for id in registry.enemy_ids() {
        let Some(entity) = registry.enemy(id) else {
            continue;
        };

        let (body, health_ratio, mut profile) = {
            let world = registry.world();
            let (Ok(body), Ok(health), Ok(profile)) = (
                world.get::<&Body>(entity),
                world.get::<&Health>(entity),
                world.get::<&EnemyProfile>(entity),
            ) else {
                continue;
            };
            if health.0.is_depleted() {
                continue;
            }
            let copied = (*body, health.0.ratio(), EnemyProfile::clone(&profile));
            copied
        };

        let target = profile.target.and_then(|t| registry.resolve_target(t));

        if profile.patrol.current().is_none() && profile.wander_point.is_none() {
            profile.wander_point = pick_wander_point(rng, arena, body.position, body.radius);
        }
        let waypoint = profile.patrol.current().or(profile.wander_point);

        let ctx = AiContext {
            archetype: profile.archetype,
            state: profile.ai_state,
            position: body.position,
            heading: profile.heading,
            target,
            waypoint,
            speed: profile.speed,
            fire_cooldown_ticks: secs_to_ticks(profile.fire_cooldown_secs),
            ticks_since_last_shot: profile
                .last_fire_tick
                .map(|t| current_tick.saturating_sub(t)),
            health_ratio,
        };
        let update = evaluate(&ctx);

        if update.state_changed {
            tracing::trace!(
                enemy = id,
                from = ?profile.ai_state,
                to = ?update.new_state,
                "ai transition"
            );
            profile.ai_state = update.new_state;
            profile.state_start_tick = current_tick;
        }
        if update.waypoint_reached {
            if profile.patrol.points.is_empty() {
                profile.wander_point = None;
            } else {
                profile.patrol.advance();
            }
        }

        let proposed = body.position + update.velocity * DT;
        let moved = probe_move(arena, ActorId::Enemy(id), body.position, proposed, blocked);
        let position = arena.bounds.clamp_inside(moved, body.radius);
        // A wanderer pressed against an obstacle gives up on its point.
        if moved != proposed && profile.patrol.points.is_empty() {
            profile.wander_point = None;
        }
        if update.velocity != DVec2::ZERO {
            profile.heading = update.velocity.normalize();
        }

        let shot = update.fire_direction.map(|direction| {
            profile.heading = direction;
            profile.last_fire_tick = Some(current_tick);
            (direction, profile.ranged_damage)
        });
        let archetype = profile.archetype;

        {
            let world = registry.world_mut();
            if let Ok(mut stored) = world.get::<&mut Body>(entity) {
                stored.position = position;
                stored.velocity = update.velocity;
            }
            if let Ok(mut stored) = world.get::<&mut EnemyProfile>(entity) {
                *stored = profile;
            }
        }

        if let Some((direction, damage)) = shot {
            let speed = get_profile(archetype).projectile_speed;
            let projectile_id = world_setup::spawn_enemy_projectile(
                registry, id, position, body.radius, direction, speed, damage,
            );
            events.push(GameEvent::ShotFired {
                projectile_id,
                shooter: ActorId::Enemy(id),
            });
        }
    }
}
