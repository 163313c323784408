//! Game phase rules: the end-of-tick progression judge and the command
//! transition table.

use skyshield_core::commands::PlayerCommand;
use skyshield_core::config::ScoringConfig;
use skyshield_core::enums::GamePhase;
use skyshield_core::error::CommandError;

/// Score needed to clear `level`.
pub fn level_target(level: u32, scoring: &ScoringConfig) -> u32 {
    level.saturating_mul(scoring.level_step)
}

/// Decide the phase after a Playing tick. Losing every battery wins over
/// reaching the level target in the same tick.
pub fn judge(
    phase: GamePhase,
    level: u32,
    level_score: u32,
    live_batteries: usize,
    scoring: &ScoringConfig,
) -> Option<GamePhase> {
    if phase != GamePhase::Playing {
        return None;
    }
    if live_batteries == 0 {
        return Some(GamePhase::Lost);
    }
    if level_score >= level_target(level, scoring) {
        return Some(if level >= scoring.max_level {
            GamePhase::Won
        } else {
            GamePhase::LevelUp
        });
    }
    None
}

/// Phase reached by a lifecycle command from `phase`.
/// `Fire` is not a lifecycle command and is rejected here.
pub fn transition(phase: GamePhase, command: &PlayerCommand) -> Result<GamePhase, CommandError> {
    let next = match (command, phase) {
        (PlayerCommand::StartGame, GamePhase::Start) => Some(GamePhase::Playing),
        (PlayerCommand::NextLevel, GamePhase::LevelUp) => Some(GamePhase::Playing),
        (PlayerCommand::Restart, phase) if phase != GamePhase::Start => Some(GamePhase::Playing),
        (PlayerCommand::Pause, GamePhase::Playing) => Some(GamePhase::Paused),
        (PlayerCommand::Resume, GamePhase::Paused) => Some(GamePhase::Playing),
        _ => None,
    };
    next.ok_or(CommandError::InvalidTransition {
        phase,
        command: command.name(),
    })
}
