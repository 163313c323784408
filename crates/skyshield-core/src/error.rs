//! Errors raised at the command and configuration boundaries.
//!
//! The tick loop itself has no error path.

use thiserror::Error;

use crate::enums::GamePhase;

/// A player or lifecycle command was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("fire target is not finite: ({x}, {y})")]
    NonFiniteTarget { x: f64, y: f64 },

    #[error("cannot fire while {phase:?}")]
    NotPlaying { phase: GamePhase },

    #[error("{command} is not accepted while {phase:?}")]
    InvalidTransition {
        phase: GamePhase,
        command: &'static str,
    },
}

/// A game configuration failed to parse or validate.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("arena must have positive size, got {width}x{height}")]
    InvalidArena { width: f64, height: f64 },

    #[error("at least one battery slot is required")]
    NoBatteries,

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} range is invalid: min {min}, max {max}")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a probability in [0, 1], got {value}")]
    InvalidProbability { field: &'static str, value: f64 },
}
