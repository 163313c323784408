//! Collision and damage resolution.
//!
//! Runs three ordered steps after integration: attacker ground impacts,
//! interceptor beams and arrivals, then blast growth and blast damage.
//! Attackers killed in a step are despawned at the end of that step, so
//! each attacker is scored at most once per tick.

use std::collections::HashSet;

use hecs::{Entity, World};
use log::debug;

use skyshield_core::components::*;
use skyshield_core::config::GameConfig;
use skyshield_core::enums::{BlastPhase, GroundTargetKind, KillSource};
use skyshield_core::events::GameEvent;
use skyshield_core::geometry::{distance_to_segment, within_box};
use skyshield_core::types::Position;

use crate::score::ScoreState;
use crate::world_setup;

/// Run all three resolution steps in order.
pub fn run(
    world: &mut World,
    config: &GameConfig,
    score: &mut ScoreState,
    next_id: &mut u32,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    resolve_impacts(world, config, score, next_id, events);
    resolve_interceptors(world, config, score, next_id, events, despawn_buffer);
    resolve_blasts(world, config, score, events, despawn_buffer);
}

/// Apply damage to a live health pool. Returns true when this hit destroyed it.
pub fn apply_damage(health: &mut Health, amount: f64) -> bool {
    if health.destroyed {
        return false;
    }
    health.current -= amount;
    if health.current <= 0.0 {
        health.destroyed = true;
        true
    } else {
        false
    }
}

/// Step 1: attackers at or below their target altitude detonate.
pub fn resolve_impacts(
    world: &mut World,
    config: &GameConfig,
    score: &mut ScoreState,
    next_id: &mut u32,
    events: &mut Vec<GameEvent>,
) {
    let mut impacts: Vec<(Entity, u32, Position)> = world
        .query::<(&Attacker, &Position)>()
        .iter()
        .filter(|(_, (attacker, pos))| pos.y >= attacker.target.y)
        .map(|(entity, (attacker, pos))| (entity, attacker.id, *pos))
        .collect();
    impacts.sort_by_key(|(_, id, _)| *id);

    for (entity, attacker_id, pos) in impacts {
        let _ = world.despawn(entity);
        score.impacts += 1;
        events.push(GameEvent::AttackerImpact {
            attacker_id,
            x: pos.x,
            y: pos.y,
        });
        let blast_id = world_setup::spawn_blast(world, config, next_id, pos);
        events.push(GameEvent::BlastSpawned {
            blast_id,
            x: pos.x,
            y: pos.y,
        });
        damage_ground_targets(world, config, &pos, events);
    }
}

fn damage_ground_targets(
    world: &mut World,
    config: &GameConfig,
    point: &Position,
    events: &mut Vec<GameEvent>,
) {
    let impact = &config.impact;

    for (_entity, (installation, pos, health)) in
        world.query_mut::<(&Installation, &Position, &mut Health)>()
    {
        if health.destroyed || !within_box(point, pos, impact.half_width, impact.half_height) {
            continue;
        }
        let destroyed = apply_damage(health, impact.damage);
        record_ground_hit(
            events,
            GroundTargetKind::Installation,
            installation.id,
            health,
            destroyed,
        );
    }

    for (_entity, (battery, pos, health)) in
        world.query_mut::<(&Battery, &Position, &mut Health)>()
    {
        if health.destroyed || !within_box(point, pos, impact.half_width, impact.half_height) {
            continue;
        }
        let destroyed = apply_damage(health, impact.damage);
        record_ground_hit(events, GroundTargetKind::Battery, battery.id, health, destroyed);
    }
}

fn record_ground_hit(
    events: &mut Vec<GameEvent>,
    kind: GroundTargetKind,
    id: u32,
    health: &Health,
    destroyed: bool,
) {
    events.push(GameEvent::GroundTargetDamaged {
        kind,
        id,
        remaining_health: health.current,
    });
    if destroyed {
        debug!("{kind:?} {id} destroyed");
        events.push(GameEvent::GroundTargetDestroyed { kind, id });
    }
}

/// Live attackers as (entity, id, position), in id order.
fn attackers(world: &World) -> Vec<(Entity, u32, Position)> {
    let mut list: Vec<(Entity, u32, Position)> = world
        .query::<(&Attacker, &Position)>()
        .iter()
        .map(|(entity, (attacker, pos))| (entity, attacker.id, *pos))
        .collect();
    list.sort_by_key(|(_, id, _)| *id);
    list
}

/// Cruising aircraft as (entity, id, position), in id order.
fn active_aircraft(world: &World) -> Vec<(Entity, u32, Position)> {
    let mut list: Vec<(Entity, u32, Position)> = world
        .query::<(&Aircraft, &Position, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| !health.destroyed)
        .map(|(entity, (aircraft, pos, _))| (entity, aircraft.id, *pos))
        .collect();
    list.sort_by_key(|(_, id, _)| *id);
    list
}

/// Damage one aircraft; scores and reports the kill when it goes down.
#[allow(clippy::too_many_arguments)]
fn hit_aircraft(
    world: &mut World,
    entity: Entity,
    aircraft_id: u32,
    amount: f64,
    source: KillSource,
    config: &GameConfig,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
) {
    let destroyed = match world.get::<&mut Health>(entity) {
        Ok(mut health) => apply_damage(&mut health, amount),
        Err(_) => false,
    };
    if destroyed {
        score.award(config.scoring.per_aircraft);
        score.aircraft_destroyed += 1;
        debug!("aircraft {aircraft_id} shot down ({source:?})");
        events.push(GameEvent::AircraftDestroyed {
            aircraft_id,
            source,
        });
    }
}

fn kill_attacker(
    attacker_id: u32,
    source: KillSource,
    config: &GameConfig,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
) {
    score.award(config.scoring.per_attacker);
    score.attackers_destroyed += 1;
    events.push(GameEvent::AttackerDestroyed {
        attacker_id,
        source,
    });
}

/// Step 2: each interceptor's beam (launch point to current point) kills
/// attackers and damages aircraft near it. An interceptor within one step
/// of its target, or one that has flown at least as far as the target lies
/// from its launch point, detonates at the target.
pub fn resolve_interceptors(
    world: &mut World,
    config: &GameConfig,
    score: &mut ScoreState,
    next_id: &mut u32,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let mut interceptors: Vec<(Entity, Interceptor, Position)> = world
        .query::<(&Interceptor, &Position)>()
        .iter()
        .map(|(entity, (interceptor, pos))| (entity, *interceptor, *pos))
        .collect();
    if interceptors.is_empty() {
        return;
    }
    interceptors.sort_by_key(|(_, interceptor, _)| interceptor.id);

    let attackers = attackers(world);
    let aircraft = active_aircraft(world);
    let beam = &config.interceptor;
    let mut killed: HashSet<Entity> = HashSet::new();
    despawn_buffer.clear();

    for (entity, interceptor, pos) in &interceptors {
        for (attacker, attacker_id, attacker_pos) in &attackers {
            if killed.contains(attacker) {
                continue;
            }
            if distance_to_segment(attacker_pos, &interceptor.start, pos)
                < beam.beam_attacker_radius
            {
                killed.insert(*attacker);
                despawn_buffer.push(*attacker);
                kill_attacker(*attacker_id, KillSource::Beam, config, score, events);
            }
        }

        for (plane, aircraft_id, plane_pos) in &aircraft {
            if distance_to_segment(plane_pos, &interceptor.start, pos) < beam.beam_aircraft_radius {
                hit_aircraft(
                    world,
                    *plane,
                    *aircraft_id,
                    beam.beam_aircraft_damage,
                    KillSource::Beam,
                    config,
                    score,
                    events,
                );
            }
        }

        if has_arrived(interceptor, pos) {
            let target = interceptor.target;
            let blast_id = world_setup::spawn_blast(world, config, next_id, target);
            events.push(GameEvent::BlastSpawned {
                blast_id,
                x: target.x,
                y: target.y,
            });
            despawn_buffer.push(*entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Advance a blast one tick. Returns false once it has shrunk away.
pub fn advance_blast(blast: &mut Blast) -> bool {
    match blast.phase {
        BlastPhase::Growing => {
            blast.radius = (blast.radius + blast.step).min(blast.max_radius);
            if blast.radius >= blast.max_radius {
                blast.phase = BlastPhase::Shrinking;
            }
            true
        }
        BlastPhase::Shrinking => {
            blast.radius -= blast.step;
            blast.radius > 0.0
        }
    }
}

/// Step 3: grow or shrink every blast, then apply blast damage.
pub fn resolve_blasts(
    world: &mut World,
    config: &GameConfig,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    let mut live: Vec<(u32, Position, f64)> = Vec::new();
    for (entity, (blast, pos)) in world.query_mut::<(&mut Blast, &Position)>() {
        if advance_blast(blast) {
            live.push((blast.id, *pos, blast.radius));
        } else {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    if live.is_empty() {
        return;
    }
    live.sort_by_key(|(id, _, _)| *id);

    let attackers = attackers(world);
    let aircraft = active_aircraft(world);
    let mut killed: HashSet<Entity> = HashSet::new();

    for (_, center, radius) in &live {
        for (attacker, attacker_id, attacker_pos) in &attackers {
            if !killed.contains(attacker) && attacker_pos.range_to(center) < *radius {
                killed.insert(*attacker);
                despawn_buffer.push(*attacker);
                kill_attacker(*attacker_id, KillSource::Blast, config, score, events);
            }
        }

        for (plane, aircraft_id, plane_pos) in &aircraft {
            if plane_pos.range_to(center) < *radius {
                hit_aircraft(
                    world,
                    *plane,
                    *aircraft_id,
                    config.blast.aircraft_damage,
                    KillSource::Blast,
                    config,
                    score,
                    events,
                );
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Arrival covers a target closer than one step to the launch point,
/// where the first move already carries the interceptor past it.
fn has_arrived(interceptor: &Interceptor, pos: &Position) -> bool {
    pos.range_to(&interceptor.target) < interceptor.speed
        || interceptor.start.range_to(pos) >= interceptor.start.range_to(&interceptor.target)
}
