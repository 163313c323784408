//! Entity spawn factories for setting up the simulation world.
//!
//! Creates installations, batteries, debris, and the transient combat
//! entities with the appropriate component bundles.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyshield_core::components::*;
use skyshield_core::config::GameConfig;
use skyshield_core::enums::BlastPhase;
use skyshield_core::types::{Position, Velocity};

/// Hand out the next entity id. Ids are unique and monotonic for the
/// lifetime of a game.
pub fn alloc_id(next_id: &mut u32) -> u32 {
    let id = *next_id;
    *next_id += 1;
    id
}

/// Populate a fresh game: ground targets at full health, full magazines,
/// and a seeded debris field.
pub fn setup_game(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    next_id: &mut u32,
) {
    for slot in &config.installations {
        let id = alloc_id(next_id);
        world.spawn((
            Installation {
                id,
                width: slot.width,
                height: slot.height,
            },
            slot.position(),
            Health::full(slot.max_health),
        ));
    }

    for (index, slot) in config.batteries.iter().enumerate() {
        let id = alloc_id(next_id);
        let base = slot.position();
        world.spawn((
            Battery {
                id,
                slot: index,
                base,
                target: base,
                ammo: slot.max_ammo,
                max_ammo: slot.max_ammo,
            },
            base,
            Health::full(slot.max_health),
        ));
    }

    seed_debris(world, rng, config, next_id);
}

/// Scatter the configured number of debris pieces across the arena.
pub fn seed_debris(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    next_id: &mut u32,
) {
    for _ in 0..config.debris.count {
        let position = Position::new(
            rng.gen_range(0.0..=config.arena.width),
            rng.gen_range(0.0..=config.arena.height),
        );
        spawn_debris(world, rng, config, next_id, position);
    }
}

/// Spawn one debris piece at `position` with a random size and drift.
pub fn spawn_debris(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    next_id: &mut u32,
    position: Position,
) -> Entity {
    let debris = &config.debris;
    let size = if debris.size_max > debris.size_min {
        rng.gen_range(debris.size_min..debris.size_max)
    } else {
        debris.size_min
    };
    let velocity = if debris.speed_max > 0.0 {
        Velocity::new(
            rng.gen_range(-debris.speed_max..=debris.speed_max),
            rng.gen_range(0.0..=debris.speed_max),
        )
    } else {
        Velocity::default()
    };
    let id = alloc_id(next_id);

    world.spawn((
        Debris {
            id,
            size,
            heading: velocity.heading(),
        },
        position,
        velocity,
    ))
}

/// Spawn a blast at `center`, starting at zero radius.
pub fn spawn_blast(
    world: &mut World,
    config: &GameConfig,
    next_id: &mut u32,
    center: Position,
) -> u32 {
    let id = alloc_id(next_id);
    world.spawn((
        Blast {
            id,
            radius: 0.0,
            max_radius: config.blast.max_radius,
            step: config.blast.growth_step,
            phase: BlastPhase::Growing,
        },
        center,
    ));
    id
}

/// Spawn an attacker from `start` toward `target`.
pub fn spawn_attacker(
    world: &mut World,
    next_id: &mut u32,
    start: Position,
    target: Position,
    speed: f64,
    launcher_id: u32,
) -> u32 {
    let id = alloc_id(next_id);
    world.spawn((
        Attacker {
            id,
            start,
            target,
            speed,
            heading: start.angle_to(&target),
            launcher_id,
        },
        start,
    ));
    id
}

/// Spawn an interceptor from a battery at `start` toward `target`.
pub fn spawn_interceptor(
    world: &mut World,
    config: &GameConfig,
    next_id: &mut u32,
    start: Position,
    target: Position,
    battery_id: u32,
) -> u32 {
    let id = alloc_id(next_id);
    world.spawn((
        Interceptor {
            id,
            start,
            target,
            speed: config.interceptor.speed,
            heading: start.angle_to(&target),
            battery_id,
        },
        start,
    ));
    id
}

/// Despawn every transient entity (attackers, interceptors, blasts,
/// aircraft, debris). Ground targets are kept.
pub fn clear_transients(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    despawn_buffer.extend(world.query_mut::<&Attacker>().into_iter().map(|(e, _)| e));
    despawn_buffer.extend(world.query_mut::<&Interceptor>().into_iter().map(|(e, _)| e));
    despawn_buffer.extend(world.query_mut::<&Blast>().into_iter().map(|(e, _)| e));
    despawn_buffer.extend(world.query_mut::<&Aircraft>().into_iter().map(|(e, _)| e));
    despawn_buffer.extend(world.query_mut::<&Debris>().into_iter().map(|(e, _)| e));

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Restore every ground target to full health and return batteries to
/// their base positions. Ammunition is untouched.
pub fn repair_ground_targets(world: &mut World) {
    for (_entity, (_installation, health)) in world.query_mut::<(&Installation, &mut Health)>() {
        *health = Health::full(health.max);
    }
    for (_entity, (battery, position, health)) in
        world.query_mut::<(&mut Battery, &mut Position, &mut Health)>()
    {
        *health = Health::full(health.max);
        battery.target = battery.base;
        *position = battery.base;
    }
}

/// Number of batteries that are not destroyed.
pub fn live_battery_count(world: &World) -> usize {
    world
        .query::<(&Battery, &Health)>()
        .iter()
        .filter(|(_, (_, health))| !health.destroyed)
        .count()
}
