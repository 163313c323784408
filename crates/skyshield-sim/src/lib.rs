//! Simulation engine for SKYSHIELD.
//!
//! Owns the hecs ECS world, runs systems once per tick,
//! and produces GameStateSnapshots for presentation.

pub mod engine;
pub mod progression;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use skyshield_core as core;

#[cfg(test)]
mod tests;
