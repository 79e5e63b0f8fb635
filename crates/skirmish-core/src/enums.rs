//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype. Tuning for each lives in the profile table of `skirmish-ai`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Fast, fragile swarmer that rams the player.
    Drone,
    /// Standard ranged infantry.
    Robot,
    /// Slow, heavily armoured artillery.
    Tank,
    /// Elite unit that falls back when badly hurt.
    Commander,
}

impl EnemyArchetype {
    pub const ALL: [EnemyArchetype; 4] = [
        EnemyArchetype::Drone,
        EnemyArchetype::Robot,
        EnemyArchetype::Tank,
        EnemyArchetype::Commander,
    ];

    /// Difficulty tier, used to bias archetype sampling toward tougher units in later waves.
    pub fn tier(self) -> u32 {
        match self {
            EnemyArchetype::Drone => 0,
            EnemyArchetype::Robot => 1,
            EnemyArchetype::Tank => 2,
            EnemyArchetype::Commander => 3,
        }
    }
}

/// Enemy AI state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    /// Walking the patrol route (or wandering).
    #[default]
    Patrol,
    /// Closing on the target.
    Chase,
    /// Holding position and firing at the target.
    Attack,
    /// Moving away from the target.
    Retreat,
}

/// Session phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Active,
    Paused,
    /// Terminal state reached (see the terminal event for the outcome).
    Ended,
    /// Cancelled by the host; entities released, no terminal event.
    Stopped,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Preset game modes sharing the one simulation core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Open arena, clear a fixed number of waves.
    #[default]
    Skirmish,
    /// Endless waves, survive for a set time.
    Survival,
    /// Cluttered arena, fill the kill-quota progress meter.
    Siege,
}

/// Difficulty preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    Easy,
    #[default]
    Normal,
    Hard,
}
