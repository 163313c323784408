//! Simulation constants and default tuning parameters.
//!
//! These seed `GameConfig::default()`; the running simulation reads the
//! config, never these constants directly.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

// --- Arena ---

/// Logical arena width.
pub const ARENA_WIDTH: f64 = 800.0;

/// Logical arena height.
pub const ARENA_HEIGHT: f64 = 600.0;

// --- Batteries ---

/// Base slots of the player's batteries (left to right).
pub const BATTERY_POSITIONS: [(f64, f64); 5] = [
    (40.0, 560.0),
    (220.0, 560.0),
    (400.0, 560.0),
    (580.0, 560.0),
    (760.0, 560.0),
];

/// Rounds loaded into each battery at game start.
pub const BATTERY_MAX_AMMO: u32 = 300;

/// Hits a battery survives.
pub const BATTERY_MAX_HEALTH: f64 = 3.0;

// --- Installations ---

/// Installation centers, placed between the battery slots.
pub const INSTALLATION_POSITIONS: [(f64, f64); 4] = [
    (130.0, 565.0),
    (310.0, 565.0),
    (490.0, 565.0),
    (670.0, 565.0),
];

pub const INSTALLATION_WIDTH: f64 = 50.0;
pub const INSTALLATION_HEIGHT: f64 = 30.0;

/// Hits an installation survives.
pub const INSTALLATION_MAX_HEALTH: f64 = 3.0;

// --- Ground impacts ---

/// Horizontal half-extent of the impact damage box.
pub const IMPACT_HALF_WIDTH: f64 = 30.0;

/// Vertical half-extent of the impact damage box.
pub const IMPACT_HALF_HEIGHT: f64 = 20.0;

/// Health removed per attacker impact.
pub const IMPACT_DAMAGE: f64 = 1.0;

// --- Blasts ---

pub const BLAST_MAX_RADIUS: f64 = 70.0;

/// Radius change per tick while growing or shrinking.
pub const BLAST_GROWTH_STEP: f64 = 1.5;

/// Damage per tick to an aircraft inside a blast.
pub const BLAST_AIRCRAFT_DAMAGE: f64 = 0.05;

// --- Interceptors ---

/// Interceptor speed (units per tick).
pub const INTERCEPTOR_SPEED: f64 = 10.0;

/// Beam half-width for destroying attackers.
pub const BEAM_ATTACKER_RADIUS: f64 = 8.0;

/// Beam half-width for damaging aircraft.
pub const BEAM_AIRCRAFT_RADIUS: f64 = 12.0;

/// Damage per tick to an aircraft touching a beam.
pub const BEAM_AIRCRAFT_DAMAGE: f64 = 0.03;

// --- Attackers ---

pub const ATTACKER_SPEED_MIN: f64 = 1.0;
pub const ATTACKER_SPEED_MAX: f64 = 2.0;

/// Fractional attacker speed increase per level above 1.
pub const ATTACKER_SPEED_PER_LEVEL: f64 = 0.1;

/// Per-tick attacker launch probability at level 1.
pub const ATTACK_BASE_PROBABILITY: f64 = 0.03;

/// Fractional launch probability increase per level above 1.
pub const ATTACK_PROBABILITY_PER_LEVEL: f64 = 0.2;

/// Horizontal aim jitter (+/-).
pub const ATTACK_AIM_JITTER: f64 = 10.0;

/// Aircraft launch cooldown at level 1 (ms).
pub const LAUNCH_COOLDOWN_BASE_MS: f64 = 1000.0;

/// Cooldown reduction per level above 1 (ms).
pub const LAUNCH_COOLDOWN_STEP_MS: f64 = 100.0;

/// Cooldown floor (ms).
pub const LAUNCH_COOLDOWN_MIN_MS: f64 = 300.0;

// --- Aircraft ---

/// Active aircraft cap at level 0; grows by one every two levels.
pub const AIRCRAFT_BASE_CAP: u32 = 5;

/// Per-tick raid probability at level 1.
pub const AIRCRAFT_SPAWN_PROBABILITY: f64 = 0.02;

/// Fractional raid probability increase per level above 1.
pub const AIRCRAFT_SPAWN_PER_LEVEL: f64 = 0.1;

/// Aircraft health at level 1; +1 per level.
pub const AIRCRAFT_BASE_HEALTH: f64 = 7.0;

pub const AIRCRAFT_SPEED_MIN: f64 = 0.8;
pub const AIRCRAFT_SPEED_MAX: f64 = 1.5;

/// Fractional aircraft speed increase per level above 1.
pub const AIRCRAFT_SPEED_PER_LEVEL: f64 = 0.1;

pub const AIRCRAFT_ALTITUDE_MIN: f64 = 60.0;
pub const AIRCRAFT_ALTITUDE_MAX: f64 = 220.0;

/// Vertical oscillation amplitude around the target altitude.
pub const AIRCRAFT_WAVE_AMPLITUDE: f64 = 20.0;

/// Spatial frequency of the oscillation (radians per unit of x).
pub const AIRCRAFT_WAVE_FREQUENCY: f64 = 0.02;

/// Fall speed of a destroyed aircraft (units per tick).
pub const AIRCRAFT_FALL_SPEED: f64 = 3.0;

/// Fraction of horizontal speed kept while falling.
pub const AIRCRAFT_FALL_DRIFT: f64 = 0.3;

/// How far past the arena edge an aircraft may fly before removal.
pub const AIRCRAFT_EXIT_MARGIN: f64 = 100.0;

/// How far outside the arena edge a raid enters.
pub const AIRCRAFT_ENTRY_OFFSET: f64 = 40.0;

/// Horizontal spacing between staggered raid members.
pub const RAID_STAGGER: f64 = 50.0;

/// Vertical spacing of the V formation flanks.
pub const RAID_V_OFFSET: f64 = 40.0;

// --- Debris ---

/// Debris pieces kept in the sky.
pub const DEBRIS_COUNT: usize = 10;

pub const DEBRIS_SIZE_MIN: f64 = 2.0;
pub const DEBRIS_SIZE_MAX: f64 = 6.0;

/// Maximum drift speed of debris (units per tick).
pub const DEBRIS_SPEED_MAX: f64 = 0.8;

/// Removal margin outside the arena.
pub const DEBRIS_MARGIN: f64 = 200.0;

// --- Formation ---

/// Ticks between formation changes.
pub const FORMATION_PERIOD_TICKS: u64 = 400;

/// Fraction of the remaining distance a battery covers per tick.
pub const FORMATION_SMOOTHING: f64 = 0.03;

/// Rise per slot of distance from the middle in the V formation.
pub const FORMATION_V_STEP: f64 = 20.0;

/// Rise per squared slot of distance from the middle in the arc formation.
pub const FORMATION_ARC_STEP: f64 = 10.0;

// --- Scoring & progression ---

/// Score per attacker destroyed.
pub const SCORE_PER_ATTACKER: u32 = 25;

/// Score per aircraft destroyed.
pub const SCORE_PER_AIRCRAFT: u32 = 100;

/// Level N is cleared at N x this score.
pub const LEVEL_SCORE_STEP: u32 = 500;

/// Clearing this level wins the game.
pub const MAX_LEVEL: u32 = 10;
