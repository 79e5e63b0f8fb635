//! Archetype-specific behavioral profiles.
//!
//! The single lookup table for enemy tuning. Nothing else in the
//! workspace branches on archetype.

use skirmish_core::enums::EnemyArchetype;

/// Tuning for one enemy archetype, before difficulty multipliers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeProfile {
    pub max_health: f64,
    /// Movement speed (units/s).
    pub speed: f64,
    pub radius: f64,
    /// Damage dealt by touching the player.
    pub contact_damage: f64,
    /// Damage per projectile.
    pub ranged_damage: f64,
    /// Seconds between shots while attacking.
    pub fire_cooldown_secs: f64,
    pub projectile_speed: f64,
    /// Patrol → Chase below this distance.
    pub aggro_radius: f64,
    /// Chase → Attack below this distance. Zero means the archetype never stops to shoot.
    pub engage_radius: f64,
    /// Attack → Chase above this distance. Larger than `engage_radius`.
    pub disengage_radius: f64,
    /// Chase/Attack/Retreat → Patrol above this distance.
    pub give_up_radius: f64,
    /// Health ratio below which the enemy retreats, if it retreats at all.
    pub retreat_below: Option<f64>,
    pub score_reward: u64,
}

/// Get the behavioral profile for a given archetype.
pub fn get_profile(archetype: EnemyArchetype) -> ArchetypeProfile {
    match archetype {
        EnemyArchetype::Drone => ArchetypeProfile {
            max_health: 50.0,
            speed: 90.0,
            radius: 10.0,
            contact_damage: 10.0,
            ranged_damage: 0.0,
            fire_cooldown_secs: 2.0,
            projectile_speed: 0.0,
            aggro_radius: 150.0,
            engage_radius: 0.0, // swarmer: rams instead of shooting
            disengage_radius: 0.0,
            give_up_radius: 260.0,
            retreat_below: None,
            score_reward: 10,
        },
        EnemyArchetype::Robot => ArchetypeProfile {
            max_health: 100.0,
            speed: 60.0,
            radius: 14.0,
            contact_damage: 10.0,
            ranged_damage: 8.0,
            fire_cooldown_secs: 1.5,
            projectile_speed: 240.0,
            aggro_radius: 150.0,
            engage_radius: 90.0,
            disengage_radius: 115.0,
            give_up_radius: 260.0,
            retreat_below: None,
            score_reward: 25,
        },
        EnemyArchetype::Tank => ArchetypeProfile {
            max_health: 250.0,
            speed: 30.0,
            radius: 20.0,
            contact_damage: 25.0,
            ranged_damage: 20.0,
            fire_cooldown_secs: 2.0,
            projectile_speed: 200.0,
            aggro_radius: 180.0,
            engage_radius: 120.0,
            disengage_radius: 145.0,
            give_up_radius: 300.0,
            retreat_below: None,
            score_reward: 50,
        },
        EnemyArchetype::Commander => ArchetypeProfile {
            max_health: 400.0,
            speed: 50.0,
            radius: 18.0,
            contact_damage: 15.0,
            ranged_damage: 12.0,
            fire_cooldown_secs: 1.5,
            projectile_speed: 280.0,
            aggro_radius: 200.0,
            engage_radius: 100.0,
            disengage_radius: 125.0,
            give_up_radius: 320.0,
            retreat_below: Some(0.25),
            score_reward: 100,
        },
    }
}
