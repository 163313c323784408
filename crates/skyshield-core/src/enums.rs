//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start command.
    #[default]
    Start,
    /// Ticks advance the simulation.
    Playing,
    /// Simulation frozen by the player.
    Paused,
    /// Level score reached; waiting for the next-level command.
    LevelUp,
    /// Final level cleared.
    Won,
    /// Every battery destroyed.
    Lost,
}

/// Blast radius lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlastPhase {
    #[default]
    Growing,
    Shrinking,
}

/// Battery formation, cycled round-robin by the formation controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormationKind {
    /// Flat row at the base slots.
    #[default]
    Line,
    /// Flanks raised linearly with distance from the middle slot.
    VShape,
    /// Flanks raised quadratically with distance from the middle slot.
    Arc,
}

impl FormationKind {
    /// The formation that follows this one in the cycle.
    pub fn next(self) -> Self {
        match self {
            FormationKind::Line => FormationKind::VShape,
            FormationKind::VShape => FormationKind::Arc,
            FormationKind::Arc => FormationKind::Line,
        }
    }
}

/// Horizontal travel direction of an aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightDirection {
    /// Entered on the left edge, flying toward +x.
    East,
    /// Entered on the right edge, flying toward -x.
    West,
}

impl FlightDirection {
    /// +1 for east, -1 for west.
    pub fn sign(self) -> f64 {
        match self {
            FlightDirection::East => 1.0,
            FlightDirection::West => -1.0,
        }
    }
}

/// Aircraft raid formation shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaidFormation {
    Solo,
    VShape,
    Line,
}

/// Kind of ground target an attacker can be aimed at or damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundTargetKind {
    Installation,
    Battery,
}

/// What destroyed an enemy, for events and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillSource {
    Beam,
    Blast,
}
