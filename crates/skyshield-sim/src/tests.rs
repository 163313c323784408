//! Tests for the simulation engine: scenarios, progression, lifecycle and determinism.

use std::collections::HashSet;

use proptest::prelude::*;

use skyshield_core::commands::{CommandOutcome, PlayerCommand};
use skyshield_core::components::{Battery, Health};
use skyshield_core::config::GameConfig;
use skyshield_core::enums::*;
use skyshield_core::error::CommandError;
use skyshield_core::events::GameEvent;
use skyshield_core::state::GameStateSnapshot;
use skyshield_core::types::Position;

use crate::engine::{SimConfig, SimulationEngine};

/// Config with every random spawn disabled, so tests control all threats.
fn quiet_config() -> GameConfig {
    let mut game = GameConfig::default();
    game.attacker.base_probability = 0.0;
    game.aircraft.spawn_probability = 0.0;
    game
}

fn started(game: GameConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig { seed: 7, game });
    engine.start_game().unwrap();
    engine
}

fn without_events(mut snap: GameStateSnapshot) -> GameStateSnapshot {
    snap.events.clear();
    snap
}

/// Fire at the attacker closest to the ground, if any.
fn fire_at_lowest(engine: &mut SimulationEngine, snap: &GameStateSnapshot) {
    if let Some(a) = snap
        .attackers
        .iter()
        .max_by(|a, b| a.position.y.total_cmp(&b.position.y))
    {
        let _ = engine.fire(a.position.x, a.position.y);
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    for i in 0..900 {
        if i % 20 == 10 {
            let fire = PlayerCommand::Fire {
                x: (i % 800) as f64,
                y: 250.0,
            };
            engine_a.queue_command(fire.clone());
            engine_b.queue_command(fire);
        }
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    // The seeded debris field alone differs from the first tick.
    let mut diverged = false;
    for _ in 0..60 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Phase lifecycle ----

#[test]
fn test_engine_starts_idle() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Start);
    assert_eq!(snap.time.tick, 0);
    assert!(snap.batteries.is_empty());
}

#[test]
fn test_start_game_populates_level_one() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.tick();

    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.level, 1);
    assert_eq!(snap.level_target, 500);
    assert_eq!(snap.installations.len(), 4);
    assert_eq!(snap.batteries.len(), 5);
    assert_eq!(snap.total_ammo(), 5 * 300);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::PhaseChanged {
            from: GamePhase::Start,
            to: GamePhase::Playing
        }
    )));
    assert_eq!(snap.time.tick, 1);
}

#[test]
fn test_pause_freezes_world() {
    let mut engine = started(GameConfig::default());
    for _ in 0..10 {
        engine.tick();
    }
    engine.pause().unwrap();
    let frozen = without_events(engine.tick());
    for _ in 0..50 {
        assert_eq!(without_events(engine.tick()), frozen);
    }
    assert_eq!(frozen.phase, GamePhase::Paused);
    assert_eq!(frozen.time.tick, 10);
    assert_eq!(
        engine.fire(100.0, 100.0),
        Err(CommandError::NotPlaying {
            phase: GamePhase::Paused
        })
    );

    engine.resume().unwrap();
    assert_eq!(engine.tick().time.tick, 11);
}

#[test]
fn test_rejected_commands_leave_state_alone() {
    let mut engine = started(quiet_config());
    assert!(engine.next_level().is_err());
    assert!(engine.start_game().is_err());
    assert!(engine.resume().is_err());
    assert_eq!(engine.phase(), GamePhase::Playing);

    // Queued rejections are logged and dropped.
    engine.queue_command(PlayerCommand::NextLevel);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.level, 1);
}

// ---- Fire command ----

#[test]
fn test_fire_rejects_non_finite_target() {
    let mut engine = started(quiet_config());
    let err = engine.fire(f64::NAN, 100.0).unwrap_err();
    assert!(matches!(err, CommandError::NonFiniteTarget { .. }));
    assert!(engine.fire(100.0, f64::INFINITY).is_err());
    assert_eq!(engine.snapshot().total_ammo(), 1500);
}

#[test]
fn test_fire_before_start_is_rejected() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    assert_eq!(
        engine.fire(100.0, 100.0),
        Err(CommandError::NotPlaying {
            phase: GamePhase::Start
        })
    );
}

#[test]
fn test_fire_clamps_to_arena() {
    let mut engine = started(quiet_config());
    engine.fire(-50.0, -80.0).unwrap();
    let snap = engine.snapshot();
    assert_eq!(snap.interceptors.len(), 1);
    assert_eq!(snap.interceptors[0].target, Position::new(0.0, 0.0));
}

#[test]
fn test_fire_with_no_ammo_is_noop() {
    let mut game = quiet_config();
    game.batteries.truncate(1);
    game.batteries[0].max_ammo = 2;
    let mut engine = started(game);

    assert!(matches!(
        engine.fire(40.0, 100.0),
        Ok(CommandOutcome::Launched { .. })
    ));
    assert!(matches!(
        engine.fire(40.0, 100.0),
        Ok(CommandOutcome::Launched { .. })
    ));
    assert_eq!(
        engine.fire(40.0, 100.0),
        Ok(CommandOutcome::NoEligibleBattery)
    );
    let snap = engine.snapshot();
    assert_eq!(snap.batteries[0].ammo, 0);
    assert_eq!(snap.interceptors.len(), 2);
}

// ---- Scenarios ----

#[test]
fn test_beam_destroys_attacker_on_pass() {
    let mut engine = started(quiet_config());
    engine.spawn_test_attacker(Position::new(40.0, 400.0), Position::new(40.0, 560.0), 0.0);

    let outcome = engine.fire(40.0, 300.0).unwrap();
    let battery_id = engine.snapshot().batteries[0].id;
    assert!(matches!(
        outcome,
        CommandOutcome::Launched { battery_id: b, .. } if b == battery_id
    ));
    assert_eq!(engine.snapshot().batteries[0].ammo, 299);

    // The beam front reaches y = 410 after 15 ticks; still 10 units short.
    for _ in 0..15 {
        engine.tick();
    }
    assert_eq!(engine.snapshot().attackers.len(), 1);
    assert_eq!(engine.score().level_score, 0);

    let snap = engine.tick();
    assert!(snap.attackers.is_empty());
    assert_eq!(snap.score, 25);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::AttackerDestroyed {
            source: KillSource::Beam,
            ..
        }
    )));

    // Arrival at y = 300 after 26 ticks detonates at the aim point.
    for _ in 0..9 {
        engine.tick();
    }
    assert_eq!(engine.snapshot().interceptors.len(), 1);
    let snap = engine.tick();
    assert!(snap.interceptors.is_empty());
    assert_eq!(snap.blasts.len(), 1);
    assert!((snap.blasts[0].center.x - 40.0).abs() < 1e-6);
    assert!((snap.blasts[0].center.y - 300.0).abs() < 1e-6);
    assert_eq!(snap.score, 25);
}

#[test]
fn test_attacker_at_target_impacts_same_tick() {
    let mut engine = started(quiet_config());
    let spot = Position::new(355.0, 565.0);
    engine.spawn_test_attacker(spot, spot, 0.0);

    let snap = engine.tick();
    assert!(snap.attackers.is_empty());
    assert_eq!(snap.blasts.len(), 1);
    assert_eq!(snap.blasts[0].center, spot);
    let spawned = snap
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::BlastSpawned { .. }))
        .count();
    assert_eq!(spawned, 1);
    // Nothing within the impact box.
    assert!(snap.installations.iter().all(|i| i.health == i.max_health));
    assert!(snap.batteries.iter().all(|b| b.health == b.max_health));
    assert_eq!(snap.score, 0);
}

#[test]
fn test_blast_lives_94_ticks() {
    let mut engine = started(quiet_config());
    let spot = Position::new(355.0, 565.0);
    engine.spawn_test_attacker(spot, spot, 0.0);

    let mut radii = Vec::new();
    for _ in 0..93 {
        let snap = engine.tick();
        assert_eq!(snap.blasts.len(), 1);
        radii.push((snap.blasts[0].radius, snap.blasts[0].phase));
    }
    assert!(engine.tick().blasts.is_empty());

    let flip = radii
        .iter()
        .position(|(_, phase)| *phase == BlastPhase::Shrinking)
        .unwrap();
    assert_eq!(flip, 46);
    assert!(radii[flip].0 >= 70.0);
    assert!(radii[..flip].windows(2).all(|w| w[1].0 > w[0].0));
    assert!(radii[flip..].windows(2).all(|w| w[1].0 < w[0].0));
}

#[test]
fn test_impact_damages_battery_in_box() {
    let mut engine = started(quiet_config());
    let battery = engine.snapshot().batteries[2].clone();
    let spot = Position::new(battery.position.x + 10.0, 560.0);
    engine.spawn_test_attacker(spot, spot, 0.0);

    let snap = engine.tick();
    assert_eq!(snap.batteries[2].health, battery.health - 1.0);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::GroundTargetDamaged {
            kind: GroundTargetKind::Battery,
            ..
        }
    )));
}

#[test]
fn test_installation_destroyed_on_second_impact() {
    let mut game = quiet_config();
    for slot in &mut game.installations {
        slot.max_health = 2.0;
    }
    let mut engine = started(game);
    let spot = engine.snapshot().installations[0].position;

    engine.spawn_test_attacker(spot, spot, 0.0);
    let snap = engine.tick();
    assert_eq!(snap.installations[0].health, 1.0);
    assert!(!snap.installations[0].destroyed);

    engine.spawn_test_attacker(spot, spot, 0.0);
    let snap = engine.tick();
    assert!(snap.installations[0].health <= 0.0);
    assert!(snap.installations[0].destroyed);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::GroundTargetDestroyed {
            kind: GroundTargetKind::Installation,
            ..
        }
    )));
    // Neighbours are outside the impact box.
    assert!(snap.installations[1..].iter().all(|i| i.health == 2.0));
}

#[test]
fn test_point_blank_fire_detonates_at_battery() {
    let mut engine = started(quiet_config());
    let battery = engine.snapshot().batteries[1].clone();
    let outcome = engine.fire(battery.position.x, battery.position.y).unwrap();
    assert!(matches!(outcome, CommandOutcome::Launched { .. }));

    let snap = engine.tick();
    assert!(snap.interceptors.is_empty());
    assert_eq!(snap.blasts.len(), 1);
    assert_eq!(snap.blasts[0].center, battery.position);

    for _ in 0..300 {
        engine.tick();
    }
    let snap = engine.snapshot();
    assert!(snap.interceptors.is_empty());
    assert!(snap.blasts.is_empty());
}

// ---- Progression ----

/// Drop attackers on every live battery until the defence is gone.
fn flatten_batteries(engine: &mut SimulationEngine) -> GameStateSnapshot {
    let mut snap = engine.snapshot();
    for _ in 0..3 {
        for battery in snap.batteries.iter().filter(|b| !b.destroyed) {
            engine.spawn_test_attacker(battery.position, battery.position, 0.0);
        }
        snap = engine.tick();
    }
    snap
}

#[test]
fn test_losing_every_battery_is_lost() {
    let mut engine = started(quiet_config());
    let snap = flatten_batteries(&mut engine);

    assert_eq!(snap.phase, GamePhase::Lost);
    assert!(snap.batteries.iter().all(|b| b.destroyed && b.health <= 0.0));
    let destroyed = snap
        .events
        .iter()
        .filter(|e| {
            matches!(
                e,
                GameEvent::GroundTargetDestroyed {
                    kind: GroundTargetKind::Battery,
                    ..
                }
            )
        })
        .count();
    assert_eq!(destroyed, 5);

    // Frozen until restart.
    let tick = snap.time.tick;
    assert_eq!(engine.tick().time.tick, tick);
    assert!(engine.fire(400.0, 300.0).is_err());
}

#[test]
fn test_loss_takes_priority_over_level_up() {
    let mut engine = started(quiet_config());
    let mut snap = engine.snapshot();
    for round in 0..3 {
        for battery in snap.batteries.iter().filter(|b| !b.destroyed) {
            engine.spawn_test_attacker(battery.position, battery.position, 0.0);
        }
        // The target is met in the same tick the last battery falls.
        if round == 2 {
            engine.award_test_points(10_000);
        }
        snap = engine.tick();
    }
    assert_eq!(snap.phase, GamePhase::Lost);
    assert!(snap.score >= snap.level_target);
}

#[test]
fn test_level_up_at_target_score() {
    let mut engine = started(quiet_config());
    engine.award_test_points(499);
    assert_eq!(engine.tick().phase, GamePhase::Playing);
    engine.award_test_points(1);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::LevelUp);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::PhaseChanged {
            from: GamePhase::Playing,
            to: GamePhase::LevelUp
        }
    )));
}

#[test]
fn test_won_after_final_level() {
    let mut engine = started(quiet_config());
    engine.set_test_level(10);
    engine.award_test_points(4_999);
    assert_eq!(engine.tick().phase, GamePhase::Playing);
    engine.award_test_points(1);
    assert_eq!(engine.tick().phase, GamePhase::Won);
}

#[test]
fn test_next_level_carries_ammo_and_repairs() {
    let mut engine = started(quiet_config());

    // Spend ammo, damage a battery, leave an interceptor in flight.
    engine.fire(40.0, 100.0).unwrap();
    engine.fire(760.0, 100.0).unwrap();
    let battery = engine.snapshot().batteries[1].clone();
    engine.spawn_test_attacker(battery.position, battery.position, 0.0);
    engine.award_test_points(500);
    let before = engine.tick();
    assert_eq!(before.phase, GamePhase::LevelUp);
    assert!(before.batteries[1].health < before.batteries[1].max_health);
    assert!(!before.interceptors.is_empty());

    engine.next_level().unwrap();
    let after = engine.snapshot();
    assert_eq!(after.phase, GamePhase::Playing);
    assert_eq!(after.level, 2);
    assert_eq!(after.level_target, 1000);
    assert_eq!(after.score, 0);
    assert_eq!(after.total_score, 500);
    assert!(after.interceptors.is_empty());
    assert!(after.blasts.is_empty());
    assert!(after.attackers.is_empty());
    assert_eq!(after.debris.len(), engine.config().debris.count);
    for (b, a) in before.batteries.iter().zip(&after.batteries) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.ammo, b.ammo);
        assert_eq!(a.health, a.max_health);
        assert!(!a.destroyed);
    }
    assert_eq!(after.total_ammo(), 1498);
}

#[test]
fn test_restart_is_idempotent() {
    let mut engine = started(GameConfig::default());
    for i in 0..300 {
        let snap = engine.tick();
        if i % 15 == 0 {
            fire_at_lowest(&mut engine, &snap);
        }
    }

    engine.restart().unwrap();
    let first = without_events(engine.snapshot());
    engine.restart().unwrap();
    let second = without_events(engine.snapshot());
    assert_eq!(first, second);
    assert_eq!(first.level, 1);
    assert_eq!(first.score, 0);
    assert_eq!(first.total_score, 0);
    assert_eq!(first.time.tick, 0);
    assert_eq!(first.total_ammo(), 1500);
}

#[test]
fn test_restart_replays_a_fresh_game() {
    let mut fresh = started(GameConfig::default());
    let mut replay = started(GameConfig::default());
    for _ in 0..120 {
        replay.tick();
    }
    replay.restart().unwrap();

    for _ in 0..200 {
        let a = without_events(fresh.tick());
        let b = without_events(replay.tick());
        assert_eq!(a, b);
    }
}

// ---- Spawner ----

#[test]
fn test_no_attackers_without_aircraft() {
    let mut game = quiet_config();
    game.attacker.base_probability = 1.0;
    let mut engine = started(game);
    for _ in 0..200 {
        let snap = engine.tick();
        assert!(snap.attackers.is_empty());
        assert!(snap.aircraft.is_empty());
    }
}

#[test]
fn test_aircraft_launch_respects_cooldown() {
    let mut game = quiet_config();
    game.attacker.base_probability = 1.0;
    let mut engine = started(game);
    engine.spawn_test_aircraft(
        Position::new(100.0, 100.0),
        FlightDirection::East,
        Health::full(7.0),
    );

    let mut launches = 0;
    for i in 0..120 {
        let snap = engine.tick();
        launches += snap
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::AircraftLaunched { .. }))
            .count();
        if i == 0 {
            assert_eq!(launches, 1);
            assert_eq!(snap.attackers.len(), 1);
        }
        if i == 50 {
            assert_eq!(launches, 1);
        }
    }
    assert_eq!(launches, 2);
}

#[test]
fn test_attackers_aim_at_live_ground_targets() {
    let mut game = quiet_config();
    game.attacker.base_probability = 1.0;
    game.attacker.cooldown_base_ms = 0.0;
    game.attacker.cooldown_min_ms = 0.0;
    let mut engine = started(game);
    engine.spawn_test_aircraft(
        Position::new(100.0, 100.0),
        FlightDirection::East,
        Health::full(7.0),
    );

    let snap = engine.snapshot();
    let grounds: Vec<Position> = snap
        .installations
        .iter()
        .map(|i| i.position)
        .chain(snap.batteries.iter().map(|b| b.position))
        .collect();
    for _ in 0..30 {
        engine.tick();
    }
    let snap = engine.snapshot();
    assert_eq!(snap.attackers.len(), 30);
    for attacker in &snap.attackers {
        assert!(grounds.iter().any(|g| {
            (attacker.target.x - g.x).abs() <= 10.0 && attacker.target.y == g.y
        }));
        assert!(attacker.position.y > attacker.start.y);
    }
}

#[test]
fn test_raid_spawns_off_screen() {
    let mut game = quiet_config();
    game.aircraft.spawn_probability = 1.0;
    let mut engine = started(game);
    let snap = engine.tick();

    assert!((1..=3).contains(&snap.aircraft.len()));
    let direction = snap.aircraft[0].direction;
    for plane in &snap.aircraft {
        assert_eq!(plane.direction, direction);
        assert!(plane.position.x < 0.0 || plane.position.x > 800.0);
        assert_eq!(plane.health, 7.0);
    }
}

#[test]
fn test_aircraft_cap_limits_raids() {
    let mut game = quiet_config();
    game.aircraft.spawn_probability = 1.0;
    let mut engine = started(game);
    for _ in 0..20 {
        let snap = engine.tick();
        // A raid is only started below the cap, so at most one raid overshoots.
        assert!(snap.aircraft.len() < 5 + 3);
    }
}

// ---- Aircraft lifecycle ----

#[test]
fn test_falling_aircraft_leaves_through_bottom() {
    let mut engine = started(quiet_config());
    let mut wreck = Health::full(7.0);
    wreck.current = 0.0;
    wreck.destroyed = true;
    engine.spawn_test_aircraft(Position::new(400.0, 592.0), FlightDirection::West, wreck);

    let snap = engine.tick();
    assert_eq!(snap.aircraft.len(), 1);
    assert!((snap.aircraft[0].position.y - 595.0).abs() < 1e-9);
    assert!(snap.aircraft[0].position.x < 400.0);
    engine.tick();
    assert!(engine.tick().aircraft.is_empty());
}

#[test]
fn test_aircraft_exit_on_far_side_only() {
    let mut engine = started(quiet_config());
    // Trailing raid member still entering from the west edge.
    engine.spawn_test_aircraft(
        Position::new(-140.0, 100.0),
        FlightDirection::East,
        Health::full(7.0),
    );
    // Leader about to leave through the east edge.
    engine.spawn_test_aircraft(
        Position::new(899.5, 100.0),
        FlightDirection::East,
        Health::full(7.0),
    );

    let snap = engine.tick();
    assert_eq!(snap.aircraft.len(), 1);
    assert!(snap.aircraft[0].position.x < 0.0);
}

#[test]
fn test_beam_shoots_down_aircraft() {
    let mut engine = started(quiet_config());
    let mut damaged = Health::full(7.0);
    damaged.current = 0.02;
    // Crosses the x = 220 beam line while the beam climbs past its altitude.
    engine.spawn_test_aircraft(Position::new(230.0, 400.0), FlightDirection::West, damaged);

    engine.fire(220.0, 300.0).unwrap();
    let mut shot_down = false;
    for _ in 0..30 {
        let snap = engine.tick();
        if snap
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::AircraftDestroyed { .. }))
        {
            shot_down = true;
            assert_eq!(snap.score, 100);
            assert!(snap.aircraft[0].destroyed);
            break;
        }
    }
    assert!(shot_down);
}

// ---- Formation ----

#[test]
fn test_formation_cycles_every_400_ticks() {
    let mut engine = started(quiet_config());
    for _ in 0..399 {
        engine.tick();
    }
    assert_eq!(engine.formation(), FormationKind::Line);
    let snap = engine.tick();
    assert_eq!(snap.formation, FormationKind::VShape);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::FormationChanged {
            formation: FormationKind::VShape
        }
    )));

    for _ in 0..200 {
        engine.tick();
    }
    let snap = engine.snapshot();
    // Outer batteries rise toward the V; the centre one stays on its base.
    assert!(snap.batteries[0].position.y < 559.0);
    assert!((snap.batteries[2].position.y - 560.0).abs() < 1e-9);
    assert_eq!(snap.batteries[0].target.y, 520.0);
}

// ---- References ----

#[test]
fn test_interceptor_survives_missing_battery() {
    let mut engine = started(quiet_config());
    let outcome = engine.fire(40.0, 300.0).unwrap();
    let CommandOutcome::Launched { battery_id, .. } = outcome else {
        panic!("expected a launch");
    };

    let entity = engine
        .world()
        .query::<&Battery>()
        .iter()
        .find(|(_, b)| b.id == battery_id)
        .map(|(e, _)| e)
        .unwrap();
    engine.world_mut().despawn(entity).unwrap();

    let mut detonated = false;
    for _ in 0..30 {
        let snap = engine.tick();
        if snap.blasts.len() == 1 {
            detonated = true;
        }
    }
    assert!(detonated);
    assert_eq!(engine.snapshot().total_ammo(), 4 * 300);
}

// ---- Invariants over long runs ----

#[test]
fn test_destroyed_flags_never_revert() {
    let mut engine = started(GameConfig::default());
    let mut destroyed: HashSet<(u32, &'static str)> = HashSet::new();
    let mut level = 1;

    for i in 0..4000 {
        let snap = engine.tick();
        if snap.level != level {
            level = snap.level;
            destroyed.clear();
        }

        for b in &snap.batteries {
            assert!(!b.destroyed || b.health <= 0.0);
            if destroyed.contains(&(b.id, "battery")) {
                assert!(b.destroyed);
            }
            if b.destroyed {
                destroyed.insert((b.id, "battery"));
            }
        }
        for inst in &snap.installations {
            assert!(!inst.destroyed || inst.health <= 0.0);
            if destroyed.contains(&(inst.id, "installation")) {
                assert!(inst.destroyed);
            }
            if inst.destroyed {
                destroyed.insert((inst.id, "installation"));
            }
        }
        for plane in &snap.aircraft {
            assert!(!plane.destroyed || plane.health <= 0.0);
        }
        assert!(snap.attackers.windows(2).all(|w| w[0].id < w[1].id));

        match snap.phase {
            GamePhase::LevelUp => engine.next_level().unwrap(),
            GamePhase::Won | GamePhase::Lost => break,
            _ => {
                if i % 12 == 0 {
                    fire_at_lowest(&mut engine, &snap);
                }
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_ammo_never_increases(
        shots in prop::collection::vec((-100.0f64..900.0, -100.0f64..700.0, 0u32..5), 1..40)
    ) {
        let mut game = quiet_config();
        for slot in &mut game.batteries {
            slot.max_ammo = 3;
        }
        let mut engine = started(game);
        let mut ammo = engine.snapshot().total_ammo();

        for (x, y, wait) in shots {
            let outcome = engine.fire(x, y).unwrap();
            let now = engine.snapshot().total_ammo();
            match outcome {
                CommandOutcome::Launched { .. } => prop_assert_eq!(now + 1, ammo),
                _ => prop_assert_eq!(now, ammo),
            }
            ammo = now;
            for _ in 0..wait {
                let snap = engine.tick();
                prop_assert!(snap.total_ammo() <= ammo);
                ammo = snap.total_ammo();
            }
        }
        prop_assert!(ammo <= 15);
    }
}
