//! Tunable game configuration.
//!
//! Every section defaults from `constants`, so a JSON file only needs the
//! fields it overrides.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::Position;

/// Complete tuning surface of the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena: ArenaConfig,
    pub batteries: Vec<BatterySlot>,
    pub installations: Vec<InstallationSlot>,
    pub impact: ImpactConfig,
    pub blast: BlastConfig,
    pub interceptor: InterceptorConfig,
    pub attacker: AttackerConfig,
    pub aircraft: AircraftConfig,
    pub debris: DebrisConfig,
    pub formation: FormationConfig,
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
}

/// Initial placement and loadout of one battery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatterySlot {
    pub x: f64,
    pub y: f64,
    pub max_ammo: u32,
    pub max_health: f64,
}

/// Initial placement of one installation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstallationSlot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub max_health: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactConfig {
    pub half_width: f64,
    pub half_height: f64,
    pub damage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlastConfig {
    pub max_radius: f64,
    pub growth_step: f64,
    pub aircraft_damage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptorConfig {
    pub speed: f64,
    pub beam_attacker_radius: f64,
    pub beam_aircraft_radius: f64,
    pub beam_aircraft_damage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackerConfig {
    pub speed_min: f64,
    pub speed_max: f64,
    pub speed_per_level: f64,
    pub base_probability: f64,
    pub probability_per_level: f64,
    pub aim_jitter: f64,
    pub cooldown_base_ms: f64,
    pub cooldown_step_ms: f64,
    pub cooldown_min_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftConfig {
    pub base_cap: u32,
    pub spawn_probability: f64,
    pub spawn_per_level: f64,
    pub base_health: f64,
    pub speed_min: f64,
    pub speed_max: f64,
    pub speed_per_level: f64,
    pub altitude_min: f64,
    pub altitude_max: f64,
    pub wave_amplitude: f64,
    pub wave_frequency: f64,
    pub fall_speed: f64,
    pub fall_drift: f64,
    pub exit_margin: f64,
    pub entry_offset: f64,
    pub stagger: f64,
    pub v_offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebrisConfig {
    pub count: usize,
    pub size_min: f64,
    pub size_max: f64,
    pub speed_max: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationConfig {
    pub period_ticks: u64,
    pub smoothing: f64,
    pub v_step: f64,
    pub arc_step: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub per_attacker: u32,
    pub per_aircraft: u32,
    pub level_step: u32,
    pub max_level: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            batteries: BATTERY_POSITIONS
                .iter()
                .map(|&(x, y)| BatterySlot {
                    x,
                    y,
                    max_ammo: BATTERY_MAX_AMMO,
                    max_health: BATTERY_MAX_HEALTH,
                })
                .collect(),
            installations: INSTALLATION_POSITIONS
                .iter()
                .map(|&(x, y)| InstallationSlot {
                    x,
                    y,
                    width: INSTALLATION_WIDTH,
                    height: INSTALLATION_HEIGHT,
                    max_health: INSTALLATION_MAX_HEALTH,
                })
                .collect(),
            impact: ImpactConfig::default(),
            blast: BlastConfig::default(),
            interceptor: InterceptorConfig::default(),
            attacker: AttackerConfig::default(),
            aircraft: AircraftConfig::default(),
            debris: DebrisConfig::default(),
            formation: FormationConfig::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            half_width: IMPACT_HALF_WIDTH,
            half_height: IMPACT_HALF_HEIGHT,
            damage: IMPACT_DAMAGE,
        }
    }
}

impl Default for BlastConfig {
    fn default() -> Self {
        Self {
            max_radius: BLAST_MAX_RADIUS,
            growth_step: BLAST_GROWTH_STEP,
            aircraft_damage: BLAST_AIRCRAFT_DAMAGE,
        }
    }
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            speed: INTERCEPTOR_SPEED,
            beam_attacker_radius: BEAM_ATTACKER_RADIUS,
            beam_aircraft_radius: BEAM_AIRCRAFT_RADIUS,
            beam_aircraft_damage: BEAM_AIRCRAFT_DAMAGE,
        }
    }
}

impl Default for AttackerConfig {
    fn default() -> Self {
        Self {
            speed_min: ATTACKER_SPEED_MIN,
            speed_max: ATTACKER_SPEED_MAX,
            speed_per_level: ATTACKER_SPEED_PER_LEVEL,
            base_probability: ATTACK_BASE_PROBABILITY,
            probability_per_level: ATTACK_PROBABILITY_PER_LEVEL,
            aim_jitter: ATTACK_AIM_JITTER,
            cooldown_base_ms: LAUNCH_COOLDOWN_BASE_MS,
            cooldown_step_ms: LAUNCH_COOLDOWN_STEP_MS,
            cooldown_min_ms: LAUNCH_COOLDOWN_MIN_MS,
        }
    }
}

impl Default for AircraftConfig {
    fn default() -> Self {
        Self {
            base_cap: AIRCRAFT_BASE_CAP,
            spawn_probability: AIRCRAFT_SPAWN_PROBABILITY,
            spawn_per_level: AIRCRAFT_SPAWN_PER_LEVEL,
            base_health: AIRCRAFT_BASE_HEALTH,
            speed_min: AIRCRAFT_SPEED_MIN,
            speed_max: AIRCRAFT_SPEED_MAX,
            speed_per_level: AIRCRAFT_SPEED_PER_LEVEL,
            altitude_min: AIRCRAFT_ALTITUDE_MIN,
            altitude_max: AIRCRAFT_ALTITUDE_MAX,
            wave_amplitude: AIRCRAFT_WAVE_AMPLITUDE,
            wave_frequency: AIRCRAFT_WAVE_FREQUENCY,
            fall_speed: AIRCRAFT_FALL_SPEED,
            fall_drift: AIRCRAFT_FALL_DRIFT,
            exit_margin: AIRCRAFT_EXIT_MARGIN,
            entry_offset: AIRCRAFT_ENTRY_OFFSET,
            stagger: RAID_STAGGER,
            v_offset: RAID_V_OFFSET,
        }
    }
}

impl Default for DebrisConfig {
    fn default() -> Self {
        Self {
            count: DEBRIS_COUNT,
            size_min: DEBRIS_SIZE_MIN,
            size_max: DEBRIS_SIZE_MAX,
            speed_max: DEBRIS_SPEED_MAX,
            margin: DEBRIS_MARGIN,
        }
    }
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            period_ticks: FORMATION_PERIOD_TICKS,
            smoothing: FORMATION_SMOOTHING,
            v_step: FORMATION_V_STEP,
            arc_step: FORMATION_ARC_STEP,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            per_attacker: SCORE_PER_ATTACKER,
            per_aircraft: SCORE_PER_AIRCRAFT,
            level_step: LEVEL_SCORE_STEP,
            max_level: MAX_LEVEL,
        }
    }
}

impl BatterySlot {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

impl InstallationSlot {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the systems rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(finite_positive(self.arena.width) && finite_positive(self.arena.height)) {
            return Err(ConfigError::InvalidArena {
                width: self.arena.width,
                height: self.arena.height,
            });
        }
        if self.batteries.is_empty() {
            return Err(ConfigError::NoBatteries);
        }
        positive("blast.max_radius", self.blast.max_radius)?;
        positive("blast.growth_step", self.blast.growth_step)?;
        positive("interceptor.speed", self.interceptor.speed)?;
        positive("formation.period_ticks", self.formation.period_ticks as f64)?;
        positive("scoring.level_step", self.scoring.level_step as f64)?;
        positive("scoring.max_level", self.scoring.max_level as f64)?;
        ordered(
            "attacker.speed",
            self.attacker.speed_min,
            self.attacker.speed_max,
        )?;
        ordered(
            "aircraft.speed",
            self.aircraft.speed_min,
            self.aircraft.speed_max,
        )?;
        ordered(
            "aircraft.altitude",
            self.aircraft.altitude_min,
            self.aircraft.altitude_max,
        )?;
        ordered("debris.size", self.debris.size_min, self.debris.size_max)?;
        probability("attacker.base_probability", self.attacker.base_probability)?;
        probability("aircraft.spawn_probability", self.aircraft.spawn_probability)?;
        probability("formation.smoothing", self.formation.smoothing)?;
        Ok(())
    }
}

/// NaN and infinities fail, so sampling ranges stay well formed.
fn finite_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if finite_positive(value) {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn ordered(field: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if finite_positive(min) && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { field, min, max })
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { field, value })
    }
}
