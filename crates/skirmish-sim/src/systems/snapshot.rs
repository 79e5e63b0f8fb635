//! Snapshot builder: copies registry state into an owned `Snapshot`.
//!
//! This system is read-only.

use skirmish_core::components::{Body, EnemyProfile, Health, ProjectileState, Trail};
use skirmish_core::config::SessionConfig;
use skirmish_core::enums::SessionPhase;
use skirmish_core::events::{GameEvent, TerminalEvent};
use skirmish_core::state::{EnemyView, PlayerView, ProjectileView, ScoreView, Snapshot};
use skirmish_core::types::SimTime;

use crate::registry::Registry;
use crate::systems::resolver;
use crate::systems::wave_director::WaveDirector;

/// Everything a snapshot is built from besides the registry.
pub struct SnapshotInputs<'a> {
    pub time: &'a SimTime,
    pub phase: SessionPhase,
    pub config: &'a SessionConfig,
    pub waves: &'a WaveDirector,
    pub movement_blocked: bool,
    pub events: Vec<GameEvent>,
    pub terminal: Option<TerminalEvent>,
}

pub fn build_snapshot(registry: &Registry, inputs: SnapshotInputs<'_>) -> Snapshot {
    let player = registry.player();
    let progress = resolver::progress(
        &inputs.config.victory,
        player,
        inputs.waves,
        inputs.time.elapsed_secs,
    );

    Snapshot {
        time: *inputs.time,
        phase: inputs.phase,
        player: build_player(registry, inputs.config, inputs.time),
        enemies: build_enemies(registry),
        projectiles: build_projectiles(registry),
        wave: inputs.waves.view(inputs.time),
        score: ScoreView {
            score: player.score,
            kills: player.kills,
            progress,
            survival_secs: inputs.time.elapsed_secs,
        },
        movement_blocked: inputs.movement_blocked,
        events: inputs.events,
        terminal: inputs.terminal,
    }
}

fn build_player(registry: &Registry, config: &SessionConfig, time: &SimTime) -> PlayerView {
    let player = registry.player();
    let weapon_name = config
        .weapons
        .get(player.weapon)
        .map(|w| w.name.clone())
        .unwrap_or_default();
    PlayerView {
        position: player.position,
        velocity: player.velocity,
        facing: player.facing,
        health: player.health,
        energy: player.energy,
        weapon: player.weapon,
        weapon_name,
        weapon_cooldown_secs: player.weapon_cooldown as f64 * time.dt(),
        invulnerable: player.invulnerable_ticks > 0,
    }
}

fn build_enemies(registry: &Registry) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = registry
        .world()
        .query::<(&Body, &Health, &EnemyProfile)>()
        .iter()
        .map(|(_, (body, health, profile))| EnemyView {
            id: profile.id,
            archetype: profile.archetype,
            position: body.position,
            velocity: body.velocity,
            radius: body.radius,
            health: health.0,
            state: profile.ai_state,
        })
        .collect();

    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_projectiles(registry: &Registry) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = registry
        .world()
        .query::<(&Body, &ProjectileState, &Trail)>()
        .iter()
        .map(|(_, (body, state, trail))| ProjectileView {
            id: state.id,
            position: body.position,
            direction: state.direction,
            from_player: state.from_player,
            trail: trail.positions.iter().copied().collect(),
        })
        .collect();

    projectiles.sort_by_key(|p| p.id);
    projectiles
}
