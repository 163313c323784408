//! Enemy raid rules for SKYSHIELD.
//!
//! Level-scaled raid parameters and aircraft formation shapes, as pure
//! functions on plain data. No ECS dependency; the simulation's spawner
//! system applies these decisions to the world.

pub mod formations;
pub mod profiles;

pub use skyshield_core as core;
