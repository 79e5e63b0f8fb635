//! Entity spawn factories.
//!
//! Builds the player record and the component bundles for enemies and
//! projectiles, applying archetype profiles and difficulty multipliers.

use glam::DVec2;

use skirmish_core::components::{Body, EnemyProfile, Health, PatrolRoute, Player, ProjectileState};
use skirmish_core::config::{Difficulty, PlayerTuning};
use skirmish_core::constants::{secs_to_ticks, ENEMY_PROJECTILE_LIFESPAN_SECS, PROJECTILE_RADIUS};
use skirmish_core::enums::{AiState, EnemyArchetype};
use skirmish_core::types::{ActorId, EnemyId, Meter, ProjectileId};
use skirmish_core::weapons::Weapon;

use skirmish_ai::profiles::get_profile;

use crate::registry::Registry;

/// Build the player at `start`, facing right.
pub fn make_player(tuning: &PlayerTuning, start: DVec2, weapon: usize) -> Player {
    let energy = match tuning.starting_energy {
        Some(current) => Meter::new(current, tuning.max_energy),
        None => Meter::full(tuning.max_energy),
    };
    Player {
        position: start,
        velocity: DVec2::ZERO,
        radius: tuning.radius,
        speed: tuning.speed,
        health: Meter::full(tuning.max_health),
        energy,
        weapon,
        facing: DVec2::X,
        score: 0,
        kills: 0,
        weapon_cooldown: 0,
        invulnerable_ticks: 0,
    }
}

/// Enemy health after difficulty and per-wave growth.
pub fn scaled_enemy_health(archetype: EnemyArchetype, wave: u32, difficulty: &Difficulty) -> f64 {
    let growth = 1.0 + difficulty.health_growth_per_wave * wave.saturating_sub(1) as f64;
    get_profile(archetype).max_health * difficulty.enemy_health * growth
}

/// Spawn an enemy hunting the player. An empty `patrol` makes it wander.
pub fn spawn_enemy(
    registry: &mut Registry,
    archetype: EnemyArchetype,
    position: DVec2,
    wave: u32,
    patrol: Vec<DVec2>,
    difficulty: &Difficulty,
    current_tick: u64,
) -> EnemyId {
    let profile = get_profile(archetype);
    let body = Body {
        position,
        velocity: DVec2::ZERO,
        radius: profile.radius,
    };
    let health = Health(Meter::full(scaled_enemy_health(archetype, wave, difficulty)));
    let record = EnemyProfile {
        id: 0,
        archetype,
        wave,
        ai_state: AiState::Patrol,
        state_start_tick: current_tick,
        target: Some(ActorId::Player),
        last_fire_tick: None,
        patrol: PatrolRoute::new(patrol),
        wander_point: None,
        heading: DVec2::NEG_X,
        speed: profile.speed * difficulty.enemy_speed,
        contact_damage: profile.contact_damage * difficulty.enemy_damage,
        ranged_damage: profile.ranged_damage * difficulty.enemy_damage,
        fire_cooldown_secs: profile.fire_cooldown_secs * difficulty.enemy_fire_cooldown,
        score_reward: profile.score_reward,
    };
    registry.spawn_enemy(body, health, record)
}

/// Spawn a player projectile leaving the player's rim along `direction`.
pub fn spawn_player_projectile(
    registry: &mut Registry,
    weapon: &Weapon,
    origin: DVec2,
    shooter_radius: f64,
    direction: DVec2,
) -> ProjectileId {
    let body = Body {
        position: origin + direction * (shooter_radius + PROJECTILE_RADIUS),
        velocity: direction * weapon.projectile_speed,
        radius: PROJECTILE_RADIUS,
    };
    let state = ProjectileState {
        id: 0,
        direction,
        speed: weapon.projectile_speed,
        damage: weapon.damage,
        from_player: true,
        owner: None,
        age_ticks: 0,
        lifespan_ticks: weapon.lifespan_ticks(),
        consumed: false,
    };
    registry.spawn_projectile(body, state)
}

/// Spawn an enemy projectile. Damage is already difficulty-scaled on the shooter.
pub fn spawn_enemy_projectile(
    registry: &mut Registry,
    owner: EnemyId,
    origin: DVec2,
    shooter_radius: f64,
    direction: DVec2,
    speed: f64,
    damage: f64,
) -> ProjectileId {
    let body = Body {
        position: origin + direction * (shooter_radius + PROJECTILE_RADIUS),
        velocity: direction * speed,
        radius: PROJECTILE_RADIUS,
    };
    let state = ProjectileState {
        id: 0,
        direction,
        speed,
        damage,
        from_player: false,
        owner: Some(owner),
        age_ticks: 0,
        lifespan_ticks: secs_to_ticks(ENEMY_PROJECTILE_LIFESPAN_SECS) as u32,
        consumed: false,
    };
    registry.spawn_projectile(body, state)
}
