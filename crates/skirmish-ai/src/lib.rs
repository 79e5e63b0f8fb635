//! Enemy AI for SKIRMISH.
//!
//! Implements the per-enemy behavior state machine, the archetype
//! profile table, and patrol point selection. Operates on plain data;
//! no ECS dependency.

pub mod fsm;
pub mod profiles;
pub mod wander;

pub use skirmish_core as core;
