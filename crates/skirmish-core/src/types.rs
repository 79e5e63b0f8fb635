//! Fundamental identifier, resource, and time types.

use serde::{Deserialize, Serialize};

use crate::constants::METER_EPSILON;

/// Stable enemy identifier. Never reused within a session.
pub type EnemyId = u32;

/// Stable projectile identifier. Never reused within a session.
pub type ProjectileId = u32;

/// Static obstacle identifier (index assigned by the arena layout).
pub type ObstacleId = u32;

/// Reference to a live actor, resolved through the registry every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id")]
pub enum ActorId {
    Player,
    Enemy(EnemyId),
}

/// A bounded resource such as health or energy.
///
/// Every mutation clamps `current` into `[0, max]`, so out-of-range
/// values cannot be produced by arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Meter {
    pub current: f64,
    pub max: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each active tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Meter {
    /// A full meter.
    pub fn full(max: f64) -> Self {
        let max = max.max(0.0);
        Self { current: max, max }
    }

    /// A meter starting at `current`, clamped into range.
    pub fn new(current: f64, max: f64) -> Self {
        let max = max.max(0.0);
        Self {
            current: current.clamp(0.0, max),
            max,
        }
    }

    /// Subtract `amount` (negative amounts are ignored). Returns the amount actually removed.
    pub fn drain(&mut self, amount: f64) -> f64 {
        let before = self.current;
        self.current = (self.current - amount.max(0.0)).clamp(0.0, self.max);
        before - self.current
    }

    /// Add `amount` (negative amounts are ignored), snapping onto `max` when within tolerance.
    pub fn restore(&mut self, amount: f64) {
        let next = (self.current + amount.max(0.0)).clamp(0.0, self.max);
        self.current = if self.max - next <= METER_EPSILON {
            self.max
        } else {
            next
        };
    }

    /// Spend `amount` only if the meter holds at least that much.
    pub fn try_spend(&mut self, amount: f64) -> bool {
        if self.current + METER_EPSILON < amount {
            return false;
        }
        self.drain(amount);
        true
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// current / max, or 0 for a zero-capacity meter.
    pub fn ratio(&self) -> f64 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs = self.tick as f64 * self.dt();
    }
}
