//! Headless host for the arena simulation.
//!
//! Loads session configuration, drives the engine from input scripts or
//! the built-in autopilot, and runs it on a fixed-rate loop thread.

pub mod autopilot;
pub mod config;
pub mod driver;
pub mod game_loop;
pub mod script;
pub mod state;

pub use skirmish_core as core;
