//! Kinematic integration system.
//!
//! Moves every mobile entity one tick: attackers and interceptors along
//! their fixed heading, debris by velocity, aircraft along a sinusoidal
//! cruise path (or a falling arc once destroyed).

use hecs::World;

use skyshield_core::components::{Aircraft, Attacker, Debris, Health, Interceptor};
use skyshield_core::config::AircraftConfig;
use skyshield_core::types::{Position, Velocity};

/// Run kinematic integration for all mobile entities.
pub fn run(world: &mut World, aircraft_config: &AircraftConfig) {
    for (_entity, (attacker, pos)) in world.query_mut::<(&Attacker, &mut Position)>() {
        *pos = pos.advanced(attacker.heading, attacker.speed);
    }

    for (_entity, (interceptor, pos)) in world.query_mut::<(&Interceptor, &mut Position)>() {
        *pos = pos.advanced(interceptor.heading, interceptor.speed);
    }

    for (_entity, (_debris, pos, vel)) in world.query_mut::<(&Debris, &mut Position, &Velocity)>()
    {
        pos.x += vel.x;
        pos.y += vel.y;
    }

    for (_entity, (aircraft, pos, health)) in
        world.query_mut::<(&Aircraft, &mut Position, &Health)>()
    {
        step_aircraft(aircraft, pos, health.destroyed, aircraft_config);
    }
}

/// Advance one aircraft by a tick.
pub fn step_aircraft(
    aircraft: &Aircraft,
    pos: &mut Position,
    destroyed: bool,
    config: &AircraftConfig,
) {
    let sign = aircraft.direction.sign();
    if destroyed {
        pos.y += config.fall_speed;
        pos.x += sign * aircraft.speed * config.fall_drift;
    } else {
        pos.x += sign * aircraft.speed;
        pos.y = cruise_altitude(aircraft.target_altitude, pos.x, config);
    }
}

/// Altitude of a cruising aircraft at horizontal position `x`.
pub fn cruise_altitude(target_altitude: f64, x: f64, config: &AircraftConfig) -> f64 {
    target_altitude + config.wave_amplitude * (x * config.wave_frequency).sin()
}
