//! Events emitted by the simulation for presentation and bookkeeping.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{EnemyArchetype, Outcome};
use crate::types::{ActorId, EnemyId, ProjectileId};

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A new wave began.
    WaveStarted { wave: u32, enemy_count: u32 },
    /// The wave was cleared; the next one starts after the grace delay.
    WaveCleared { wave: u32, bonus: u64 },
    EnemySpawned {
        enemy_id: EnemyId,
        archetype: EnemyArchetype,
        position: DVec2,
    },
    /// No valid spawn point was found; the spawn is retried next tick.
    SpawnDeferred { wave: u32 },
    ShotFired {
        projectile_id: ProjectileId,
        shooter: ActorId,
    },
    /// A projectile struck an actor.
    Hit {
        projectile_id: ProjectileId,
        target: ActorId,
        damage: f64,
    },
    /// An enemy body touched the player.
    ContactDamage { enemy_id: EnemyId, damage: f64 },
    EnemyKilled {
        enemy_id: EnemyId,
        archetype: EnemyArchetype,
        reward: u64,
    },
    /// Fire was requested but the player lacks energy.
    OutOfEnergy,
    WeaponSelected { index: usize },
    Paused,
    Resumed,
    /// The session reached its terminal state.
    SessionEnded { outcome: Outcome },
}

/// Emitted exactly once when the session ends in victory or defeat.
/// Consumed by the external progression ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerminalEvent {
    pub outcome: Outcome,
    pub final_score: u64,
    pub kills: u32,
    pub wave_reached: u32,
    pub survival_secs: f64,
}
