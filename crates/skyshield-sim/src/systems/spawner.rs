//! Enemy spawner system: attacker launches, aircraft raids and the
//! debris field. Decisions come from the level's `RaidProfile`; this
//! system only applies them to the world.

use hecs::{Entity, World};
use log::trace;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyshield_core::components::{Aircraft, Battery, Debris, Health, Installation};
use skyshield_core::config::GameConfig;
use skyshield_core::events::GameEvent;
use skyshield_core::types::Position;
use skyshield_threat_ai::formations;
use skyshield_threat_ai::profiles::{sample_speed, RaidProfile};

use crate::systems::movement::cruise_altitude;
use crate::world_setup;

/// Run the spawner for one tick.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    profile: &RaidProfile,
    next_id: &mut u32,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) {
    launch_attacker(world, rng, config, profile, next_id, now_ms, events);
    spawn_raid(world, rng, config, profile, next_id);
    replenish_debris(world, rng, config, next_id);
}

/// Try to launch one attacker from a random active aircraft.
/// Returns the new attacker id, or `None` when the roll, the launcher
/// cooldown or the lack of launchers or targets prevents a launch.
pub fn launch_attacker(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    profile: &RaidProfile,
    next_id: &mut u32,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) -> Option<u32> {
    if rng.gen::<f64>() >= profile.attack_probability {
        return None;
    }

    let mut launchers: Vec<(Entity, u32, Position, Option<f64>)> = world
        .query::<(&Aircraft, &Position, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| !health.destroyed)
        .map(|(entity, (aircraft, pos, _))| (entity, aircraft.id, *pos, aircraft.last_fired_ms))
        .collect();
    if launchers.is_empty() {
        return None;
    }
    launchers.sort_by_key(|(_, id, _, _)| *id);

    let pick = rng.gen_range(0..launchers.len());
    let (launcher, launcher_id, origin, last_fired) = launchers[pick];
    if !profile.cooldown_elapsed(last_fired, now_ms) {
        return None;
    }

    let targets = ground_targets(world);
    if targets.is_empty() {
        return None;
    }
    let mut aim = targets[rng.gen_range(0..targets.len())];
    let jitter = config.attacker.aim_jitter;
    if jitter > 0.0 {
        aim.x += rng.gen_range(-jitter..=jitter);
    }
    let speed = sample_speed(rng, &profile.attacker_speed);

    let attacker_id = world_setup::spawn_attacker(world, next_id, origin, aim, speed, launcher_id);
    if let Ok(mut aircraft) = world.get::<&mut Aircraft>(launcher) {
        aircraft.last_fired_ms = Some(now_ms);
    }
    trace!("aircraft {launcher_id} launched attacker {attacker_id}");
    events.push(GameEvent::AircraftLaunched {
        aircraft_id: launcher_id,
        attacker_id,
    });
    Some(attacker_id)
}

/// Positions of every live installation and battery, installations first,
/// each group in id order.
fn ground_targets(world: &World) -> Vec<Position> {
    let mut installations: Vec<(u32, Position)> = world
        .query::<(&Installation, &Position, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| !health.destroyed)
        .map(|(_, (installation, pos, _))| (installation.id, *pos))
        .collect();
    installations.sort_by_key(|(id, _)| *id);

    let mut batteries: Vec<(u32, Position)> = world
        .query::<(&Battery, &Position, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| !health.destroyed)
        .map(|(_, (battery, pos, _))| (battery.id, *pos))
        .collect();
    batteries.sort_by_key(|(id, _)| *id);

    installations
        .into_iter()
        .chain(batteries)
        .map(|(_, pos)| pos)
        .collect()
}

/// Try to spawn a raid of aircraft. Returns the number spawned.
pub fn spawn_raid(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    profile: &RaidProfile,
    next_id: &mut u32,
) -> usize {
    let active = world
        .query::<(&Aircraft, &Health)>()
        .iter()
        .filter(|(_, (_, health))| !health.destroyed)
        .count();
    if active >= profile.aircraft_cap as usize {
        return 0;
    }
    if rng.gen::<f64>() >= profile.aircraft_probability {
        return 0;
    }

    let aircraft_config = &config.aircraft;
    let formation = formations::pick_formation(rng);
    let direction = formations::pick_direction(rng);
    let altitude = if aircraft_config.altitude_max > aircraft_config.altitude_min {
        rng.gen_range(aircraft_config.altitude_min..=aircraft_config.altitude_max)
    } else {
        aircraft_config.altitude_min
    };
    let speed = sample_speed(rng, &profile.aircraft_speed);
    let entry = formations::entry_x(direction, config.arena.width, aircraft_config);

    let members = formations::layout(formation, direction, aircraft_config);
    for offset in &members {
        let id = world_setup::alloc_id(next_id);
        let target_altitude = altitude + offset.dy;
        let x = entry + offset.dx;
        world.spawn((
            Aircraft {
                id,
                target_altitude,
                speed,
                direction,
                last_fired_ms: None,
            },
            Position::new(x, cruise_altitude(target_altitude, x, aircraft_config)),
            Health::full(profile.aircraft_health),
        ));
    }
    trace!("{formation:?} raid of {} entering {direction:?}", members.len());
    members.len()
}

/// Top the debris field back up by one piece just above the top edge.
pub fn replenish_debris(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    next_id: &mut u32,
) {
    let count = world.query::<&Debris>().iter().count();
    if count >= config.debris.count {
        return;
    }
    let x = rng.gen_range(0.0..=config.arena.width);
    let y = -config.debris.size_max;
    world_setup::spawn_debris(world, rng, config, next_id, Position::new(x, y));
}
