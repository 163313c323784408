//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use skyshield_core::components::*;
use skyshield_core::enums::*;
use skyshield_core::events::GameEvent;
use skyshield_core::state::*;
use skyshield_core::types::{Position, SimTime};

use crate::score::ScoreState;

/// Engine-level state the snapshot reports alongside the world contents.
pub struct SnapshotContext<'a> {
    pub time: &'a SimTime,
    pub phase: GamePhase,
    pub level: u32,
    pub level_target: u32,
    pub formation: FormationKind,
    pub score: &'a ScoreState,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    context: SnapshotContext<'_>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *context.time,
        phase: context.phase,
        level: context.level,
        score: context.score.level_score,
        total_score: context.score.total_score,
        level_target: context.level_target,
        formation: context.formation,
        attackers: build_attackers(world),
        interceptors: build_interceptors(world),
        blasts: build_blasts(world),
        installations: build_installations(world),
        batteries: build_batteries(world),
        debris: build_debris(world),
        aircraft: build_aircraft(world),
        events,
    }
}

fn build_attackers(world: &World) -> Vec<AttackerView> {
    let mut views: Vec<AttackerView> = world
        .query::<(&Attacker, &Position)>()
        .iter()
        .map(|(_, (attacker, pos))| AttackerView {
            id: attacker.id,
            start: attacker.start,
            position: *pos,
            target: attacker.target,
            heading: attacker.heading,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_interceptors(world: &World) -> Vec<InterceptorView> {
    let mut views: Vec<InterceptorView> = world
        .query::<(&Interceptor, &Position)>()
        .iter()
        .map(|(_, (interceptor, pos))| InterceptorView {
            id: interceptor.id,
            start: interceptor.start,
            position: *pos,
            target: interceptor.target,
            battery_id: interceptor.battery_id,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_blasts(world: &World) -> Vec<BlastView> {
    let mut views: Vec<BlastView> = world
        .query::<(&Blast, &Position)>()
        .iter()
        .map(|(_, (blast, pos))| BlastView {
            id: blast.id,
            center: *pos,
            radius: blast.radius,
            max_radius: blast.max_radius,
            phase: blast.phase,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_installations(world: &World) -> Vec<InstallationView> {
    let mut views: Vec<InstallationView> = world
        .query::<(&Installation, &Position, &Health)>()
        .iter()
        .map(|(_, (installation, pos, health))| InstallationView {
            id: installation.id,
            position: *pos,
            width: installation.width,
            height: installation.height,
            health: health.current,
            max_health: health.max,
            destroyed: health.destroyed,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_batteries(world: &World) -> Vec<BatteryView> {
    let mut views: Vec<BatteryView> = world
        .query::<(&Battery, &Position, &Health)>()
        .iter()
        .map(|(_, (battery, pos, health))| BatteryView {
            id: battery.id,
            position: *pos,
            target: battery.target,
            ammo: battery.ammo,
            max_ammo: battery.max_ammo,
            health: health.current,
            max_health: health.max,
            destroyed: health.destroyed,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_debris(world: &World) -> Vec<DebrisView> {
    let mut views: Vec<DebrisView> = world
        .query::<(&Debris, &Position)>()
        .iter()
        .map(|(_, (debris, pos))| DebrisView {
            id: debris.id,
            position: *pos,
            size: debris.size,
            heading: debris.heading,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_aircraft(world: &World) -> Vec<AircraftView> {
    let mut views: Vec<AircraftView> = world
        .query::<(&Aircraft, &Position, &Health)>()
        .iter()
        .map(|(_, (aircraft, pos, health))| AircraftView {
            id: aircraft.id,
            position: *pos,
            direction: aircraft.direction,
            health: health.current,
            max_health: health.max,
            destroyed: health.destroyed,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}
