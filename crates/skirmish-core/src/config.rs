//! Session configuration, supplied once at session start.
//!
//! Every struct is `#[serde(default)]` so a host can deserialize a
//! partial file and inherit the remaining defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arena::Arena;
use crate::constants::*;
use crate::enums::{DifficultyLevel, EnemyArchetype};
use crate::weapons::{default_loadout, Weapon};

/// Everything a session needs to start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed. Same seed + same inputs = same simulation.
    pub seed: u64,
    pub arena: Arena,
    pub weapons: Vec<Weapon>,
    pub starting_weapon: usize,
    /// First wave index (1-based).
    pub starting_wave: u32,
    pub difficulty: Difficulty,
    pub waves: WaveRules,
    pub player: PlayerTuning,
    pub victory: VictoryCondition,
    pub enabled_archetypes: Vec<EnemyArchetype>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena: Arena::default(),
            weapons: default_loadout(),
            starting_weapon: 0,
            starting_wave: 1,
            difficulty: Difficulty::default(),
            waves: WaveRules::default(),
            player: PlayerTuning::default(),
            victory: VictoryCondition::ClearWaves { final_wave: 5 },
            enabled_archetypes: EnemyArchetype::ALL.to_vec(),
        }
    }
}

/// Multipliers applied on top of the archetype table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Difficulty {
    pub enemy_health: f64,
    pub enemy_speed: f64,
    pub enemy_damage: f64,
    /// Multiplier on enemy firing cooldowns (lower fires faster).
    pub enemy_fire_cooldown: f64,
    /// Extra enemy health per wave beyond the first (0.1 = +10% per wave).
    pub health_growth_per_wave: f64,
    /// Bias archetype sampling toward higher tiers as waves progress.
    pub weight_archetypes_by_wave: bool,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::preset(DifficultyLevel::Normal)
    }
}

impl Difficulty {
    pub fn preset(level: DifficultyLevel) -> Self {
        match level {
            DifficultyLevel::Easy => Self {
                enemy_health: 0.8,
                enemy_speed: 0.85,
                enemy_damage: 0.75,
                enemy_fire_cooldown: 1.25,
                health_growth_per_wave: 0.0,
                weight_archetypes_by_wave: false,
            },
            DifficultyLevel::Normal => Self {
                enemy_health: 1.0,
                enemy_speed: 1.0,
                enemy_damage: 1.0,
                enemy_fire_cooldown: 1.0,
                health_growth_per_wave: 0.0,
                weight_archetypes_by_wave: false,
            },
            DifficultyLevel::Hard => Self {
                enemy_health: 1.25,
                enemy_speed: 1.15,
                enemy_damage: 1.25,
                enemy_fire_cooldown: 0.8,
                health_growth_per_wave: 0.1,
                weight_archetypes_by_wave: true,
            },
        }
    }
}

/// Wave sizing and pacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveRules {
    /// When false the director never spawns; enemies come only from scripted spawns.
    pub enabled: bool,
    pub base_count: u32,
    pub per_wave: u32,
    pub cap: u32,
    pub grace_secs: f64,
    pub spawn_interval_ticks: u64,
    /// Score bonus per cleared wave, multiplied by the wave index.
    pub clear_bonus: u64,
}

impl Default for WaveRules {
    fn default() -> Self {
        Self {
            enabled: true,
            base_count: WAVE_BASE_ENEMIES,
            per_wave: WAVE_ENEMIES_PER_INDEX,
            cap: WAVE_ENEMY_CAP,
            grace_secs: WAVE_GRACE_SECS,
            spawn_interval_ticks: WAVE_SPAWN_INTERVAL_TICKS,
            clear_bonus: WAVE_CLEAR_BONUS,
        }
    }
}

impl WaveRules {
    /// Enemy count for a wave: `min(base + per_wave * index, cap)`.
    /// Non-decreasing in `index`.
    pub fn enemy_count(&self, index: u32) -> u32 {
        self.base_count
            .saturating_add(self.per_wave.saturating_mul(index))
            .min(self.cap)
    }
}

/// Player stats at session start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: f64,
    pub max_energy: f64,
    /// Starting energy; `None` starts full.
    pub starting_energy: Option<f64>,
    pub speed: f64,
    pub radius: f64,
    pub energy_regen_per_tick: f64,
    pub invulnerability_ticks: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: PLAYER_MAX_HEALTH,
            max_energy: PLAYER_MAX_ENERGY,
            starting_energy: None,
            speed: PLAYER_SPEED,
            radius: PLAYER_RADIUS,
            energy_regen_per_tick: PLAYER_ENERGY_REGEN_PER_TICK,
            invulnerability_ticks: CONTACT_INVULNERABILITY_TICKS,
        }
    }
}

/// When a session ends in victory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VictoryCondition {
    /// Clear this wave.
    ClearWaves { final_wave: u32 },
    /// Fill the progress meter: reach this many kills.
    KillQuota { kills: u32 },
    /// Stay alive this long.
    SurviveFor { secs: f64 },
    /// Only defeat ends the session.
    Endless,
}

/// Reasons a session configuration is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("weapon table is empty")]
    NoWeapons,
    #[error("starting weapon {index} out of range (table has {len})")]
    StartingWeaponOutOfRange { index: usize, len: usize },
    #[error("weapon `{name}` has a non-positive {field}")]
    InvalidWeapon { name: String, field: &'static str },
    #[error("no enemy archetypes enabled")]
    NoArchetypes,
    #[error("arena has no spawn points")]
    NoSpawnPoints,
    #[error("arena bounds are empty")]
    DegenerateArena,
    #[error("player start lies outside the arena or inside an obstacle")]
    BlockedPlayerStart,
    #[error("wave cap must be at least 1")]
    ZeroWaveCap,
    #[error("starting wave must be at least 1")]
    ZeroStartingWave,
    #[error("starting wave {starting} is past the final wave {final_wave}")]
    StartingWavePastFinal { starting: u32, final_wave: u32 },
    #[error("clearing waves requires waves to be enabled")]
    WavesDisabled,
    #[error("player {0} must be positive")]
    InvalidPlayer(&'static str),
    #[error("difficulty multiplier `{0}` must be positive")]
    InvalidDifficulty(&'static str),
}

impl SessionConfig {
    /// Check the configuration before a session starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weapons.is_empty() {
            return Err(ConfigError::NoWeapons);
        }
        if self.starting_weapon >= self.weapons.len() {
            return Err(ConfigError::StartingWeaponOutOfRange {
                index: self.starting_weapon,
                len: self.weapons.len(),
            });
        }
        for weapon in &self.weapons {
            let checks = [
                ("damage", weapon.damage),
                ("fire rate", weapon.fire_rate),
                ("projectile speed", weapon.projectile_speed),
                ("range", weapon.range),
            ];
            if let Some((field, _)) = checks.iter().find(|(_, v)| !(*v > 0.0)) {
                return Err(ConfigError::InvalidWeapon {
                    name: weapon.name.clone(),
                    field: *field,
                });
            }
            if weapon.energy_cost < 0.0 {
                return Err(ConfigError::InvalidWeapon {
                    name: weapon.name.clone(),
                    field: "energy cost",
                });
            }
        }
        if self.enabled_archetypes.is_empty() {
            return Err(ConfigError::NoArchetypes);
        }
        if self.arena.bounds.width() <= 0.0 || self.arena.bounds.height() <= 0.0 {
            return Err(ConfigError::DegenerateArena);
        }
        if self.waves.enabled && self.arena.spawn_points.is_empty() {
            return Err(ConfigError::NoSpawnPoints);
        }
        if !self.arena.is_open(self.arena.player_start) {
            return Err(ConfigError::BlockedPlayerStart);
        }
        if self.waves.cap == 0 {
            return Err(ConfigError::ZeroWaveCap);
        }
        if self.starting_wave == 0 {
            return Err(ConfigError::ZeroStartingWave);
        }
        if let VictoryCondition::ClearWaves { final_wave } = self.victory {
            if !self.waves.enabled {
                return Err(ConfigError::WavesDisabled);
            }
            if self.starting_wave > final_wave {
                return Err(ConfigError::StartingWavePastFinal {
                    starting: self.starting_wave,
                    final_wave,
                });
            }
        }
        if !(self.player.max_health > 0.0) {
            return Err(ConfigError::InvalidPlayer("max health"));
        }
        if !(self.player.max_energy > 0.0) {
            return Err(ConfigError::InvalidPlayer("max energy"));
        }
        if !(self.player.radius > 0.0) {
            return Err(ConfigError::InvalidPlayer("radius"));
        }
        let multipliers = [
            ("enemy_health", self.difficulty.enemy_health),
            ("enemy_speed", self.difficulty.enemy_speed),
            ("enemy_damage", self.difficulty.enemy_damage),
            ("enemy_fire_cooldown", self.difficulty.enemy_fire_cooldown),
        ];
        if let Some((name, _)) = multipliers.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(ConfigError::InvalidDifficulty(*name));
        }
        Ok(())
    }

    /// A quiet session: no waves, no victory condition. Enemies come only
    /// from scripted spawns. Used for sandboxes and scripted scenarios.
    pub fn sandbox() -> Self {
        Self {
            waves: WaveRules {
                enabled: false,
                ..WaveRules::default()
            },
            victory: VictoryCondition::Endless,
            ..Self::default()
        }
    }
}
