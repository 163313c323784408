//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Discrete things that happened during a tick or command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    InterceptorLaunched {
        interceptor_id: u32,
        battery_id: u32,
    },
    BlastSpawned {
        blast_id: u32,
        x: f64,
        y: f64,
    },
    /// An attacker reached its target altitude and exploded.
    AttackerImpact { attacker_id: u32, x: f64, y: f64 },
    AttackerDestroyed { attacker_id: u32, source: KillSource },
    AircraftLaunched { aircraft_id: u32, attacker_id: u32 },
    AircraftDestroyed { aircraft_id: u32, source: KillSource },
    GroundTargetDamaged {
        kind: GroundTargetKind,
        id: u32,
        remaining_health: f64,
    },
    GroundTargetDestroyed { kind: GroundTargetKind, id: u32 },
    PhaseChanged { from: GamePhase, to: GamePhase },
    FormationChanged { formation: FormationKind },
}
