//! Arena combat simulation.
//!
//! Owns the entity registry, runs systems at a fixed tick rate,
//! and produces `Snapshot`s for the host.

pub mod engine;
pub mod registry;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use skirmish_core as core;

#[cfg(test)]
mod tests;
