//! Player commands sent from the input/UI layer to the simulation.
//!
//! Commands either apply immediately (`SimulationEngine::apply_command`) or are
//! queued for processing at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Launch an interceptor at a point in arena coordinates.
    Fire { x: f64, y: f64 },
    /// Leave the start screen and begin level 1.
    StartGame,
    /// Continue after a level-up.
    NextLevel,
    /// Start over at level 1 after winning or losing.
    Restart,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}

impl PlayerCommand {
    /// Short name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            PlayerCommand::Fire { .. } => "Fire",
            PlayerCommand::StartGame => "StartGame",
            PlayerCommand::NextLevel => "NextLevel",
            PlayerCommand::Restart => "Restart",
            PlayerCommand::Pause => "Pause",
            PlayerCommand::Resume => "Resume",
        }
    }
}

/// Successful result of applying a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    /// An interceptor was launched.
    Launched { interceptor_id: u32, battery_id: u32 },
    /// Fire was accepted but no battery could shoot.
    NoEligibleBattery,
    /// A lifecycle transition happened.
    Transitioned,
}
