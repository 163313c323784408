//! State shared between the game loop thread and its controller.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use skyshield_core::commands::PlayerCommand;
use skyshield_core::enums::GamePhase;
use skyshield_core::events::GameEvent;
use skyshield_core::state::GameStateSnapshot;

/// Commands sent from the input layer to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, updated by the game loop after each tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// Totals gathered from the snapshots of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub phase: GamePhase,
    pub level: u32,
    pub best_level: u32,
    pub total_score: u32,
    pub best_total_score: u32,
    pub games_lost: u32,
    pub games_won: u32,
    pub interceptors_launched: u32,
    pub attackers_destroyed: u32,
    pub aircraft_destroyed: u32,
    pub impacts: u32,
}

impl RunSummary {
    /// Fold one tick's snapshot into the totals.
    pub fn observe(&mut self, snapshot: &GameStateSnapshot) {
        self.ticks += 1;
        self.phase = snapshot.phase;
        self.level = snapshot.level;
        self.best_level = self.best_level.max(snapshot.level);
        self.total_score = snapshot.total_score;
        self.best_total_score = self.best_total_score.max(snapshot.total_score);

        for event in &snapshot.events {
            match event {
                GameEvent::InterceptorLaunched { .. } => self.interceptors_launched += 1,
                GameEvent::AttackerDestroyed { .. } => self.attackers_destroyed += 1,
                GameEvent::AircraftDestroyed { .. } => self.aircraft_destroyed += 1,
                GameEvent::AttackerImpact { .. } => self.impacts += 1,
                GameEvent::PhaseChanged { to, .. } => match to {
                    GamePhase::Lost => self.games_lost += 1,
                    GamePhase::Won => self.games_won += 1,
                    _ => {}
                },
                _ => {}
            }
        }
    }
}
