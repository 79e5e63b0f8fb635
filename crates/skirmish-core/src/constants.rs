//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Tolerance used when snapping a meter onto its maximum.
pub const METER_EPSILON: f64 = 1e-9;

// --- Arena ---

/// Default arena width in world units.
pub const ARENA_WIDTH: f64 = 800.0;

/// Default arena height in world units.
pub const ARENA_HEIGHT: f64 = 600.0;

// --- Player ---

/// Player body radius.
pub const PLAYER_RADIUS: f64 = 12.0;

/// Player movement speed (units/s).
pub const PLAYER_SPEED: f64 = 180.0;

/// Default player max health.
pub const PLAYER_MAX_HEALTH: f64 = 100.0;

/// Default player max energy.
pub const PLAYER_MAX_ENERGY: f64 = 100.0;

/// Passive energy regeneration per tick.
pub const PLAYER_ENERGY_REGEN_PER_TICK: f64 = 0.2;

/// Contact-damage invulnerability window (ticks). Half a second at 60Hz.
pub const CONTACT_INVULNERABILITY_TICKS: u32 = 30;

// --- Projectiles ---

/// Collision radius of every projectile.
pub const PROJECTILE_RADIUS: f64 = 3.0;

/// Number of trail positions kept per projectile.
pub const TRAIL_LENGTH: usize = 8;

/// Enemy projectile lifespan (seconds).
pub const ENEMY_PROJECTILE_LIFESPAN_SECS: f64 = 3.0;

// --- AI ---

/// Distance at which an enemy counts as having reached a patrol point.
pub const PATROL_ARRIVAL_RADIUS: f64 = 6.0;

/// Fraction of archetype speed used while patrolling.
pub const PATROL_SPEED_FACTOR: f64 = 0.6;

/// Attempts made when picking a random reachable wander point.
pub const WANDER_POINT_ATTEMPTS: u32 = 8;

// --- Waves ---

/// Default base enemy count (wave index is added on top).
pub const WAVE_BASE_ENEMIES: u32 = 3;

/// Default extra enemies per wave index.
pub const WAVE_ENEMIES_PER_INDEX: u32 = 1;

/// Default cap on enemies per wave.
pub const WAVE_ENEMY_CAP: u32 = 8;

/// Default grace delay between a wave clear and the next wave (seconds).
pub const WAVE_GRACE_SECS: f64 = 3.0;

/// Default delay between consecutive spawns inside a wave (ticks).
pub const WAVE_SPAWN_INTERVAL_TICKS: u64 = 20;

/// Spawn-point attempts before a spawn is deferred to the next tick.
pub const MAX_SPAWN_ATTEMPTS: usize = 4;

/// Extra weight per wave index per archetype tier when weighting is enabled.
pub const ARCHETYPE_WAVE_BIAS: f64 = 0.25;

/// Default score bonus per cleared wave (multiplied by wave index).
pub const WAVE_CLEAR_BONUS: u64 = 50;

/// Fractions of a tick below this are float noise, not a partial tick.
const TICK_EPSILON: f64 = 1e-6;

/// Convert seconds to whole ticks (rounded up).
pub fn secs_to_ticks(secs: f64) -> u64 {
    (secs * TICK_RATE as f64 - TICK_EPSILON).ceil().max(0.0) as u64
}
