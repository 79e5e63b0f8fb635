//! Game mode presets.
//!
//! Every mode runs the same engine; a mode only chooses the arena, wave
//! rules and victory condition, with difficulty layered on top.

use glam::DVec2;

use skirmish_core::arena::Arena;
use skirmish_core::config::{Difficulty, SessionConfig, VictoryCondition, WaveRules};
use skirmish_core::constants::{ARENA_HEIGHT, ARENA_WIDTH};
use skirmish_core::enums::{DifficultyLevel, GameMode};
use skirmish_core::geometry::Rect;

/// Build the session configuration for a mode at a difficulty.
pub fn build_config(mode: GameMode, level: DifficultyLevel) -> SessionConfig {
    let mut config = match mode {
        GameMode::Skirmish => build_skirmish(),
        GameMode::Survival => build_survival(),
        GameMode::Siege => build_siege(),
    };
    let growth = config.difficulty.health_growth_per_wave;
    config.difficulty = Difficulty::preset(level);
    // Survival keeps its own per-wave growth unless the preset is steeper.
    config.difficulty.health_growth_per_wave = config.difficulty.health_growth_per_wave.max(growth);
    config
}

/// Skirmish: open arena, clear five waves.
fn build_skirmish() -> SessionConfig {
    SessionConfig {
        arena: Arena::open(ARENA_WIDTH, ARENA_HEIGHT),
        victory: VictoryCondition::ClearWaves { final_wave: 5 },
        ..SessionConfig::default()
    }
}

/// Survival: endless waves that grow tougher; last three minutes.
fn build_survival() -> SessionConfig {
    let mut config = SessionConfig {
        arena: Arena::open(ARENA_WIDTH, ARENA_HEIGHT),
        waves: WaveRules {
            cap: 12,
            grace_secs: 2.0,
            ..WaveRules::default()
        },
        victory: VictoryCondition::SurviveFor { secs: 180.0 },
        ..SessionConfig::default()
    };
    config.difficulty.health_growth_per_wave = 0.15;
    config
}

/// Siege: four pillars around the centre, fill a 40-kill quota.
fn build_siege() -> SessionConfig {
    let pillar = DVec2::new(60.0, 60.0);
    let arena = [
        DVec2::new(-200.0, -150.0),
        DVec2::new(140.0, -150.0),
        DVec2::new(-200.0, 90.0),
        DVec2::new(140.0, 90.0),
    ]
    .into_iter()
    .fold(Arena::open(ARENA_WIDTH, ARENA_HEIGHT), |arena, origin| {
        arena.with_obstacle(Rect::from_size(origin, pillar))
    });

    SessionConfig {
        arena,
        victory: VictoryCondition::KillQuota { kills: 40 },
        ..SessionConfig::default()
    }
}
