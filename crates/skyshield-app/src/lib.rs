//! SKYSHIELD headless application.
//!
//! Wires the simulation engine to a paced game-loop thread, a built-in
//! autopilot, and config-file loading for the `skyshield` binary.

pub mod autopilot;
pub mod game_loop;
pub mod settings;
pub mod state;

pub use skyshield_core as core;
