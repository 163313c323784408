//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state. All state lives in components or is passed in by the engine.

pub mod cleanup;
pub mod collision;
pub mod fire_control;
pub mod formation;
pub mod movement;
pub mod snapshot;
pub mod spawner;
