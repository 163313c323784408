//! Running score state tracked by the engine.

use serde::Serialize;

/// Score and combat statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreState {
    /// Score within the current level; compared against the level target.
    pub level_score: u32,
    /// Score since the last restart.
    pub total_score: u32,
    pub attackers_destroyed: u32,
    pub aircraft_destroyed: u32,
    pub interceptors_fired: u32,
    /// Attackers that reached the ground.
    pub impacts: u32,
}

impl ScoreState {
    pub fn award(&mut self, points: u32) {
        self.level_score += points;
        self.total_score += points;
    }

    /// Start a new level: the level score resets, statistics carry over.
    pub fn reset_level(&mut self) {
        self.level_score = 0;
    }
}
