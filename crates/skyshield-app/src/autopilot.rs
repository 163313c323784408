//! Demo autopilot: plays the game from snapshots alone.
//!
//! Starts and advances levels automatically, restarts after a game ends,
//! and fires at the most dangerous attacker that is not already covered
//! by an interceptor or a live blast.

use skyshield_core::commands::PlayerCommand;
use skyshield_core::enums::GamePhase;
use skyshield_core::state::{AttackerView, GameStateSnapshot};
use skyshield_core::types::Position;

/// Autopilot tuning.
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Minimum ticks between shots.
    pub fire_interval: u64,
    /// How far ahead along its heading an attacker is led.
    pub lead_distance: f64,
    /// Aim points closer than this to a pending detonation are skipped.
    pub cover_radius: f64,
    /// Restart automatically after Won or Lost.
    pub auto_restart: bool,
    last_shot_tick: Option<u64>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            fire_interval: 8,
            lead_distance: 25.0,
            cover_radius: 35.0,
            auto_restart: true,
            last_shot_tick: None,
        }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Command to issue after seeing `snapshot`, if any.
    pub fn decide(&mut self, snapshot: &GameStateSnapshot) -> Option<PlayerCommand> {
        match snapshot.phase {
            GamePhase::Start => Some(PlayerCommand::StartGame),
            GamePhase::LevelUp => {
                self.last_shot_tick = None;
                Some(PlayerCommand::NextLevel)
            }
            GamePhase::Won | GamePhase::Lost if self.auto_restart => {
                self.last_shot_tick = None;
                Some(PlayerCommand::Restart)
            }
            GamePhase::Playing => self.pick_shot(snapshot),
            _ => None,
        }
    }

    fn pick_shot(&mut self, snapshot: &GameStateSnapshot) -> Option<PlayerCommand> {
        let tick = snapshot.time.tick;
        if let Some(last) = self.last_shot_tick {
            if tick < last + self.fire_interval {
                return None;
            }
        }
        if snapshot.total_ammo() == 0 {
            return None;
        }

        // Closest to the ground first; ignore attackers already covered.
        let aim = snapshot
            .attackers
            .iter()
            .map(|attacker| (attacker, self.lead(attacker)))
            .filter(|(_, aim)| !self.is_covered(aim, snapshot))
            .max_by(|(a, _), (b, _)| a.position.y.total_cmp(&b.position.y))
            .map(|(_, aim)| aim)?;

        self.last_shot_tick = Some(tick);
        Some(PlayerCommand::Fire { x: aim.x, y: aim.y })
    }

    fn lead(&self, attacker: &AttackerView) -> Position {
        attacker.position.advanced(attacker.heading, self.lead_distance)
    }

    fn is_covered(&self, aim: &Position, snapshot: &GameStateSnapshot) -> bool {
        snapshot
            .interceptors
            .iter()
            .any(|i| i.target.range_to(aim) < self.cover_radius)
            || snapshot
                .blasts
                .iter()
                .any(|b| b.center.range_to(aim) < b.max_radius.max(self.cover_radius))
    }
}
