//! Core types and definitions for the SKIRMISH arena simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry helpers, components, intents, session configuration,
//! snapshots, events, and constants. It has no dependency on the ECS
//! or on any host runtime.

pub mod arena;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod geometry;
pub mod state;
pub mod types;
pub mod weapons;
