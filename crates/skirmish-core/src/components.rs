//! Entity records.
//!
//! Enemy and projectile records are stored as hecs components; the player
//! is a single record owned directly by the registry. Components are plain
//! data, game logic lives in systems.

use std::collections::VecDeque;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{AiState, EnemyArchetype};
use crate::types::{ActorId, EnemyId, Meter, ProjectileId};

/// Kinematic body shared by enemies and projectiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: DVec2,
    /// Velocity (units/s) applied during the last movement step.
    pub velocity: DVec2,
    pub radius: f64,
}

/// Health of an enemy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Health(pub Meter);

/// The player avatar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub speed: f64,
    pub health: Meter,
    pub energy: Meter,
    /// Index into the session's weapon table.
    pub weapon: usize,
    /// Unit facing vector; projectiles leave along it.
    pub facing: DVec2,
    pub score: u64,
    pub kills: u32,
    /// Ticks until the equipped weapon can fire again.
    pub weapon_cooldown: u32,
    /// Ticks during which contact damage is ignored.
    pub invulnerable_ticks: u32,
}

/// Ordered patrol waypoints with the index of the current destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatrolRoute {
    pub points: Vec<DVec2>,
    pub index: usize,
}

impl PatrolRoute {
    pub fn new(points: Vec<DVec2>) -> Self {
        Self { points, index: 0 }
    }

    pub fn current(&self) -> Option<DVec2> {
        self.points.get(self.index % self.points.len().max(1)).copied()
    }

    /// Move on to the next waypoint, wrapping around.
    pub fn advance(&mut self) {
        if !self.points.is_empty() {
            self.index = (self.index + 1) % self.points.len();
        }
    }
}

/// Enemy identity, combat stats, and AI bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    pub id: EnemyId,
    pub archetype: EnemyArchetype,
    /// Wave this enemy was spawned for (0 for scripted spawns).
    pub wave: u32,
    pub ai_state: AiState,
    /// Tick at which the current AI state was entered.
    pub state_start_tick: u64,
    /// Who this enemy is hunting. Resolved through the registry each tick.
    pub target: Option<ActorId>,
    pub last_fire_tick: Option<u64>,
    pub patrol: PatrolRoute,
    /// Random destination used when the patrol route is empty.
    pub wander_point: Option<DVec2>,
    /// Last direction of travel or fire.
    pub heading: DVec2,
    pub speed: f64,
    pub contact_damage: f64,
    pub ranged_damage: f64,
    pub fire_cooldown_secs: f64,
    pub score_reward: u64,
}

/// Projectile flight state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileState {
    pub id: ProjectileId,
    /// Unit direction of travel.
    pub direction: DVec2,
    pub speed: f64,
    pub damage: f64,
    pub from_player: bool,
    /// Firing enemy, for enemy projectiles.
    pub owner: Option<EnemyId>,
    pub age_ticks: u32,
    pub lifespan_ticks: u32,
    /// Set once the projectile has hit something or expired.
    pub consumed: bool,
}

/// Recent positions for trail rendering (newest first).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    pub positions: VecDeque<DVec2>,
}

impl Trail {
    pub fn record(&mut self, position: DVec2, capacity: usize) {
        self.positions.push_front(position);
        self.positions.truncate(capacity);
    }
}
