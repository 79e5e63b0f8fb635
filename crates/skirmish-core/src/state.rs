//! Snapshot: the complete visible state published after each tick.
//!
//! Snapshots are owned copies; the presentation layer never sees live
//! simulation state.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{AiState, EnemyArchetype, SessionPhase};
use crate::events::{GameEvent, TerminalEvent};
use crate::types::{EnemyId, Meter, ProjectileId, SimTime};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub player: PlayerView,
    /// Sorted by id.
    pub enemies: Vec<EnemyView>,
    /// Sorted by id.
    pub projectiles: Vec<ProjectileView>,
    pub wave: WaveView,
    pub score: ScoreView,
    /// True when an obstacle rejected part of the player's move this tick.
    pub movement_blocked: bool,
    /// Events produced by this tick.
    pub events: Vec<GameEvent>,
    /// Set once the session has ended in victory or defeat.
    pub terminal: Option<TerminalEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: DVec2,
    pub velocity: DVec2,
    pub facing: DVec2,
    pub health: Meter,
    pub energy: Meter,
    pub weapon: usize,
    pub weapon_name: String,
    /// Seconds until the weapon can fire again.
    pub weapon_cooldown_secs: f64,
    pub invulnerable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub archetype: EnemyArchetype,
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub health: Meter,
    pub state: AiState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: ProjectileId,
    pub position: DVec2,
    pub direction: DVec2,
    pub from_player: bool,
    /// Recent positions, newest first.
    pub trail: Vec<DVec2>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveView {
    /// Current wave index (0 before the first wave).
    pub index: u32,
    pub target_count: u32,
    pub kills_this_wave: u32,
    /// Enemies of this wave not yet killed.
    pub enemies_remaining: u32,
    /// Seconds until the next wave, while between waves.
    pub next_wave_in_secs: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u64,
    pub kills: u32,
    /// Progress toward a kill-quota or survival victory, 0.0 - 1.0.
    pub progress: Option<f64>,
    pub survival_secs: f64,
}
