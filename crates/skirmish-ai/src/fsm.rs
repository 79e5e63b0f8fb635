//! Enemy behavior finite state machine.
//!
//! Pure functions that compute state transitions, desired velocity, and
//! fire decisions for one enemy from its archetype, current state, and
//! situation. No ECS dependency; operates on plain data.

use glam::DVec2;

use skirmish_core::constants::{DT, PATROL_ARRIVAL_RADIUS, PATROL_SPEED_FACTOR};
use skirmish_core::enums::{AiState, EnemyArchetype};
use skirmish_core::geometry::direction_or;

use crate::profiles::{get_profile, ArchetypeProfile};

/// Input to the FSM for a single enemy.
#[derive(Debug, Clone, Copy)]
pub struct AiContext {
    pub archetype: EnemyArchetype,
    pub state: AiState,
    pub position: DVec2,
    /// Last direction of travel or fire; used when a direction is undefined.
    pub heading: DVec2,
    /// Resolved target position, `None` when the target is gone.
    pub target: Option<DVec2>,
    /// Current patrol destination.
    pub waypoint: Option<DVec2>,
    /// Movement speed after difficulty scaling.
    pub speed: f64,
    /// Firing cooldown after difficulty scaling, in whole ticks.
    pub fire_cooldown_ticks: u64,
    /// Ticks since the last shot, `None` if the enemy has never fired.
    pub ticks_since_last_shot: Option<u64>,
    /// current health / max health.
    pub health_ratio: f64,
}

/// Output from the FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiUpdate {
    pub new_state: AiState,
    pub state_changed: bool,
    /// Desired velocity for this tick (units/s).
    pub velocity: DVec2,
    /// Unit direction to fire along, if the enemy shoots this tick.
    pub fire_direction: Option<DVec2>,
    /// The enemy is within arrival distance of its waypoint.
    pub waypoint_reached: bool,
}

/// State transition as a pure function of distance-to-target and health ratio.
///
/// A missing distance (no resolvable target) always yields `Patrol`.
pub fn next_state(
    profile: &ArchetypeProfile,
    state: AiState,
    distance: Option<f64>,
    health_ratio: f64,
) -> AiState {
    let Some(d) = distance else {
        return AiState::Patrol;
    };
    let retreating = profile
        .retreat_below
        .is_some_and(|threshold| health_ratio < threshold);

    match state {
        AiState::Patrol => {
            if d < profile.aggro_radius {
                AiState::Chase
            } else {
                AiState::Patrol
            }
        }
        AiState::Chase => {
            if d > profile.give_up_radius {
                AiState::Patrol
            } else if retreating {
                AiState::Retreat
            } else if d < profile.engage_radius {
                AiState::Attack
            } else {
                AiState::Chase
            }
        }
        AiState::Attack => {
            if d > profile.give_up_radius {
                AiState::Patrol
            } else if retreating {
                AiState::Retreat
            } else if d > profile.disengage_radius {
                AiState::Chase
            } else {
                AiState::Attack
            }
        }
        AiState::Retreat => {
            if d > profile.give_up_radius {
                AiState::Patrol
            } else {
                AiState::Retreat
            }
        }
    }
}

/// Evaluate the FSM for one enemy.
pub fn evaluate(ctx: &AiContext) -> AiUpdate {
    let profile = get_profile(ctx.archetype);
    let distance = ctx.target.map(|t| ctx.position.distance(t));
    let new_state = next_state(&profile, ctx.state, distance, ctx.health_ratio);

    let mut update = AiUpdate {
        new_state,
        state_changed: new_state != ctx.state,
        velocity: DVec2::ZERO,
        fire_direction: None,
        waypoint_reached: false,
    };

    match (new_state, ctx.target) {
        (AiState::Patrol, _) => {
            if let Some(waypoint) = ctx.waypoint {
                if ctx.position.distance(waypoint) <= PATROL_ARRIVAL_RADIUS {
                    update.waypoint_reached = true;
                } else {
                    update.velocity = seek(ctx, waypoint, ctx.speed * PATROL_SPEED_FACTOR);
                }
            }
        }
        (AiState::Chase, Some(target)) => {
            update.velocity = seek(ctx, target, ctx.speed);
        }
        (AiState::Attack, Some(target)) => {
            let ready = ctx
                .ticks_since_last_shot
                .map_or(true, |elapsed| elapsed >= ctx.fire_cooldown_ticks);
            if ready {
                update.fire_direction = Some(direction_or(ctx.position, target, ctx.heading));
            }
        }
        (AiState::Retreat, Some(target)) => {
            let away = direction_or(target, ctx.position, -ctx.heading);
            update.velocity = away * ctx.speed;
        }
        // Non-patrol states always have a target; next_state guarantees it.
        _ => {}
    }

    update
}

/// Velocity toward `goal` at `speed`, scaled down so one tick never overshoots.
fn seek(ctx: &AiContext, goal: DVec2, speed: f64) -> DVec2 {
    let dist = ctx.position.distance(goal);
    let dir = direction_or(ctx.position, goal, ctx.heading);
    dir * speed.min(dist / DT)
}
