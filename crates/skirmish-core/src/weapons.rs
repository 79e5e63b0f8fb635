//! Weapon definitions. Weapons are immutable values selected by the player.

use serde::{Deserialize, Serialize};

use crate::constants::TICK_RATE;

/// A player weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    /// Damage dealt per projectile.
    pub damage: f64,
    /// Shots per second.
    pub fire_rate: f64,
    /// Projectile speed (units/s).
    pub projectile_speed: f64,
    /// Energy spent per shot.
    pub energy_cost: f64,
    /// Distance a projectile travels before expiring.
    pub range: f64,
}

impl Weapon {
    pub fn new(
        name: &str,
        damage: f64,
        fire_rate: f64,
        projectile_speed: f64,
        energy_cost: f64,
        range: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            damage,
            fire_rate,
            projectile_speed,
            energy_cost,
            range,
        }
    }

    /// Ticks between shots.
    pub fn cooldown_ticks(&self) -> u32 {
        if self.fire_rate <= 0.0 {
            return u32::MAX;
        }
        (TICK_RATE as f64 / self.fire_rate).ceil().max(1.0) as u32
    }

    /// Projectile lifespan in ticks (range / speed).
    pub fn lifespan_ticks(&self) -> u32 {
        if self.projectile_speed <= 0.0 {
            return 0;
        }
        (self.range / self.projectile_speed * TICK_RATE as f64).ceil() as u32
    }
}

/// The standard weapon table.
pub fn default_loadout() -> Vec<Weapon> {
    vec![
        Weapon::new("Blaster", 25.0, 4.0, 420.0, 5.0, 360.0),
        Weapon::new("Repeater", 10.0, 10.0, 480.0, 2.0, 300.0),
        Weapon::new("Rail Rifle", 40.0, 2.0, 600.0, 12.0, 520.0),
        Weapon::new("Cannon", 80.0, 0.8, 300.0, 25.0, 420.0),
    ]
}
