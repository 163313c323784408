//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems, not components.
//! `Position`, `Velocity` and `Health` are shared; every entity kind also
//! carries exactly one kind component, which makes each kind its own store.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Hit points shared by installations, batteries and aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
    /// Set exactly once, when `current` first drops to zero or below.
    pub destroyed: bool,
}

impl Health {
    pub fn full(max: f64) -> Self {
        Self {
            current: max,
            max,
            destroyed: false,
        }
    }
}

/// Enemy projectile descending toward a ground target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Attacker {
    pub id: u32,
    pub start: Position,
    /// Jittered aim point; the attacker resolves once it reaches `target.y`.
    pub target: Position,
    /// Units per tick.
    pub speed: f64,
    /// Radians.
    pub heading: f64,
    /// Aircraft that launched it.
    pub launcher_id: u32,
}

/// Player projectile. Its travelled path (start to current) acts as a beam.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Interceptor {
    pub id: u32,
    pub start: Position,
    pub target: Position,
    pub speed: f64,
    pub heading: f64,
    /// Weak reference to the launching battery (lookup only).
    pub battery_id: u32,
}

/// Area effect with a grow-then-shrink radius.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Blast {
    pub id: u32,
    pub radius: f64,
    pub max_radius: f64,
    /// Radius change per tick.
    pub step: f64,
    pub phase: BlastPhase,
}

/// Protected, non-combatant ground structure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Installation {
    pub id: u32,
    pub width: f64,
    pub height: f64,
}

/// Player defense unit with limited ammo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Battery {
    pub id: u32,
    /// Index into the configured battery slots; drives formation offsets.
    pub slot: usize,
    /// Fixed base position of the slot.
    pub base: Position,
    /// Where the formation controller is steering the battery.
    pub target: Position,
    pub ammo: u32,
    pub max_ammo: u32,
}

/// Decorative background meteor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Debris {
    pub id: u32,
    pub size: f64,
    pub heading: f64,
}

/// Enemy carrier that launches attackers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: u32,
    /// Altitude the flight path oscillates around.
    pub target_altitude: f64,
    /// Horizontal units per tick.
    pub speed: f64,
    pub direction: FlightDirection,
    /// Simulation milliseconds of the last launch, `None` if it never fired.
    pub last_fired_ms: Option<f64>,
}
