//! Level-scaled raid parameters.
//!
//! Consolidates every difficulty formula the spawner needs for one level.

use std::ops::Range;

use skyshield_core::config::GameConfig;

/// Raid parameters in effect for one level.
#[derive(Debug, Clone, PartialEq)]
pub struct RaidProfile {
    pub level: u32,
    /// Per-tick probability of an attacker launch attempt.
    pub attack_probability: f64,
    /// Minimum time between launches of one aircraft (ms).
    pub launch_cooldown_ms: f64,
    /// Attacker speed range (units per tick).
    pub attacker_speed: Range<f64>,
    /// Maximum number of active aircraft.
    pub aircraft_cap: u32,
    /// Per-tick probability of a new raid.
    pub aircraft_probability: f64,
    /// Aircraft speed range (units per tick).
    pub aircraft_speed: Range<f64>,
    /// Health of each aircraft in a raid.
    pub aircraft_health: f64,
}

impl RaidProfile {
    /// Compute the profile for `level` (1-based) from the tuning config.
    pub fn for_level(level: u32, config: &GameConfig) -> Self {
        let steps = level.saturating_sub(1) as f64;
        let attacker = &config.attacker;
        let aircraft = &config.aircraft;

        let attacker_scale = 1.0 + attacker.speed_per_level * steps;
        let aircraft_scale = 1.0 + aircraft.speed_per_level * steps;

        Self {
            level,
            attack_probability: (attacker.base_probability
                * (1.0 + attacker.probability_per_level * steps))
                .min(1.0),
            launch_cooldown_ms: (attacker.cooldown_base_ms - attacker.cooldown_step_ms * steps)
                .max(attacker.cooldown_min_ms),
            attacker_speed: attacker.speed_min * attacker_scale
                ..attacker.speed_max * attacker_scale,
            aircraft_cap: aircraft.base_cap + level / 2,
            aircraft_probability: (aircraft.spawn_probability
                * (1.0 + aircraft.spawn_per_level * steps))
                .min(1.0),
            aircraft_speed: aircraft.speed_min * aircraft_scale
                ..aircraft.speed_max * aircraft_scale,
            aircraft_health: aircraft.base_health + steps,
        }
    }

    /// Whether an aircraft that last fired at `last_fired_ms` may fire at `now_ms`.
    pub fn cooldown_elapsed(&self, last_fired_ms: Option<f64>, now_ms: f64) -> bool {
        match last_fired_ms {
            Some(last) => now_ms - last >= self.launch_cooldown_ms,
            None => true,
        }
    }
}

/// Draw a speed from `range`, tolerating an empty range.
pub fn sample_speed<R: rand::Rng>(rng: &mut R, range: &Range<f64>) -> f64 {
    if range.end > range.start {
        rng.gen_range(range.clone())
    } else {
        range.start
    }
}
