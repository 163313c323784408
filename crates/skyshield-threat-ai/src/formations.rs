//! Aircraft raid formation shapes.

use rand::Rng;

use skyshield_core::config::AircraftConfig;
use skyshield_core::enums::{FlightDirection, RaidFormation};

/// Offset of one raid member from the raid's entry point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemberOffset {
    pub dx: f64,
    pub dy: f64,
}

/// Pick one of the three raid formations uniformly.
pub fn pick_formation<R: Rng>(rng: &mut R) -> RaidFormation {
    match rng.gen_range(0..3) {
        0 => RaidFormation::Solo,
        1 => RaidFormation::VShape,
        _ => RaidFormation::Line,
    }
}

/// Pick an entry side uniformly.
pub fn pick_direction<R: Rng>(rng: &mut R) -> FlightDirection {
    if rng.gen_bool(0.5) {
        FlightDirection::East
    } else {
        FlightDirection::West
    }
}

/// Member offsets for a formation. Trailing members sit further outside the
/// arena, behind the leader relative to `direction`.
pub fn layout(
    formation: RaidFormation,
    direction: FlightDirection,
    config: &AircraftConfig,
) -> Vec<MemberOffset> {
    let behind = -direction.sign() * config.stagger;

    match formation {
        RaidFormation::Solo => vec![MemberOffset { dx: 0.0, dy: 0.0 }],
        RaidFormation::VShape => vec![
            MemberOffset {
                dx: behind,
                dy: -config.v_offset,
            },
            MemberOffset { dx: 0.0, dy: 0.0 },
            MemberOffset {
                dx: behind,
                dy: config.v_offset,
            },
        ],
        RaidFormation::Line => (0..3)
            .map(|i| MemberOffset {
                dx: behind * i as f64,
                dy: 0.0,
            })
            .collect(),
    }
}

/// Entry x just outside the edge the raid comes from.
pub fn entry_x(direction: FlightDirection, arena_width: f64, config: &AircraftConfig) -> f64 {
    match direction {
        FlightDirection::East => -config.entry_offset,
        FlightDirection::West => arena_width + config.entry_offset,
    }
}
