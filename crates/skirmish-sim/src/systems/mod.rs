//! Systems run by the engine each tick, in pipeline order.
//!
//! Systems are free functions over the registry. They do not own state,
//! except the wave director which carries wave bookkeeping between ticks.

pub mod ai;
pub mod cleanup;
pub mod collision;
pub mod input;
pub mod movement;
pub mod projectiles;
pub mod resolver;
pub mod snapshot;
pub mod wave_director;
pub mod weapons;
