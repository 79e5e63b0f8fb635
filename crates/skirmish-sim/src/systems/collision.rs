//! Collision detection.
//!
//! Detection is read-only: it produces a [`CollisionReport`] that the
//! resolver applies. Movement probing against static obstacles is done
//! here too, before positions are committed.

use glam::DVec2;

use skirmish_core::arena::Arena;
use skirmish_core::components::{Body, EnemyProfile, Health, ProjectileState};
use skirmish_core::geometry::circles_overlap;
use skirmish_core::types::{ActorId, EnemyId, ObstacleId, ProjectileId};

use crate::registry::Registry;

/// A projectile that overlapped an opposing actor this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileHit {
    pub projectile: ProjectileId,
    pub target: ActorId,
}

/// An axis move rejected because it would enter an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockedMove {
    pub mover: ActorId,
    pub obstacle: ObstacleId,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// At most one entry per projectile, in ascending projectile id order.
    pub hits: Vec<ProjectileHit>,
    /// Enemies whose bodies overlap the player, ascending id.
    pub contacts: Vec<EnemyId>,
    pub blocked: Vec<BlockedMove>,
}

impl CollisionReport {
    pub fn player_blocked(&self) -> bool {
        self.blocked.iter().any(|b| b.mover == ActorId::Player)
    }
}

/// Try to move from `from` to `proposed`, one axis at a time.
///
/// An axis whose move would put the centre inside an obstacle is rejected
/// and recorded in `blocked`. There is no sliding resolution.
pub fn probe_move(
    arena: &Arena,
    mover: ActorId,
    from: DVec2,
    proposed: DVec2,
    blocked: &mut Vec<BlockedMove>,
) -> DVec2 {
    let mut position = from;

    if proposed.x != from.x {
        let candidate = DVec2::new(proposed.x, position.y);
        match arena.obstacle_at(candidate) {
            Some(obstacle) => blocked.push(BlockedMove {
                mover,
                obstacle: obstacle.id,
            }),
            None => position = candidate,
        }
    }
    if proposed.y != from.y {
        let candidate = DVec2::new(position.x, proposed.y);
        match arena.obstacle_at(candidate) {
            Some(obstacle) => blocked.push(BlockedMove {
                mover,
                obstacle: obstacle.id,
            }),
            None => position = candidate,
        }
    }

    position
}

/// Detect projectile hits and contact pairs. `blocked` carries the
/// movement rejections gathered earlier in the tick.
pub fn detect(registry: &Registry, blocked: Vec<BlockedMove>) -> CollisionReport {
    let world = registry.world();

    let mut enemies: Vec<(EnemyId, DVec2, f64)> = world
        .query::<(&Body, &Health, &EnemyProfile)>()
        .iter()
        .filter(|(_, (_, health, _))| !health.0.is_depleted())
        .map(|(_, (body, _, profile))| (profile.id, body.position, body.radius))
        .collect();
    enemies.sort_by_key(|(id, _, _)| *id);

    let mut projectiles: Vec<(ProjectileId, DVec2, f64, bool)> = world
        .query::<(&Body, &ProjectileState)>()
        .iter()
        .filter(|(_, (_, state))| !state.consumed)
        .map(|(_, (body, state))| (state.id, body.position, body.radius, state.from_player))
        .collect();
    projectiles.sort_by_key(|(id, _, _, _)| *id);

    let player = registry.player();
    let player_alive = !player.health.is_depleted();

    let mut hits = Vec::new();
    for (projectile, position, radius, from_player) in projectiles {
        let target = if from_player {
            enemies
                .iter()
                .find(|(_, enemy_pos, enemy_radius)| {
                    circles_overlap(position, radius, *enemy_pos, *enemy_radius)
                })
                .map(|(id, _, _)| ActorId::Enemy(*id))
        } else if player_alive
            && circles_overlap(position, radius, player.position, player.radius)
        {
            Some(ActorId::Player)
        } else {
            None
        };

        if let Some(target) = target {
            hits.push(ProjectileHit { projectile, target });
        }
    }

    let contacts = if player_alive {
        enemies
            .iter()
            .filter(|(_, pos, radius)| {
                circles_overlap(*pos, *radius, player.position, player.radius)
            })
            .map(|(id, _, _)| *id)
            .collect()
    } else {
        Vec::new()
    };

    CollisionReport {
        hits,
        contacts,
        blocked,
    }
}
