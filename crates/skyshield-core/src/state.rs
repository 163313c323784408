//! Game state snapshot: the complete visible state handed to presentation each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub level: u32,
    /// Score within the current level.
    pub score: u32,
    /// Score accumulated over all levels since the last restart.
    pub total_score: u32,
    /// Score needed to clear the current level.
    pub level_target: u32,
    pub formation: FormationKind,
    pub attackers: Vec<AttackerView>,
    pub interceptors: Vec<InterceptorView>,
    pub blasts: Vec<BlastView>,
    pub installations: Vec<InstallationView>,
    pub batteries: Vec<BatteryView>,
    pub debris: Vec<DebrisView>,
    pub aircraft: Vec<AircraftView>,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackerView {
    pub id: u32,
    pub start: Position,
    pub position: Position,
    pub target: Position,
    pub heading: f64,
}

/// Interceptors render as a beam from `start` to `position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterceptorView {
    pub id: u32,
    pub start: Position,
    pub position: Position,
    pub target: Position,
    pub battery_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlastView {
    pub id: u32,
    pub center: Position,
    pub radius: f64,
    pub max_radius: f64,
    pub phase: BlastPhase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallationView {
    pub id: u32,
    pub position: Position,
    pub width: f64,
    pub height: f64,
    pub health: f64,
    pub max_health: f64,
    pub destroyed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryView {
    pub id: u32,
    pub position: Position,
    pub target: Position,
    pub ammo: u32,
    pub max_ammo: u32,
    pub health: f64,
    pub max_health: f64,
    pub destroyed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebrisView {
    pub id: u32,
    pub position: Position,
    pub size: f64,
    pub heading: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftView {
    pub id: u32,
    pub position: Position,
    pub direction: FlightDirection,
    pub health: f64,
    pub max_health: f64,
    /// Destroyed aircraft are falling and no longer fight.
    pub destroyed: bool,
}

impl GameStateSnapshot {
    /// Total ammo left across all batteries.
    pub fn total_ammo(&self) -> u32 {
        self.batteries.iter().map(|b| b.ammo).sum()
    }
}
