//! Game loop: runs the simulation engine at 60 Hz on its own thread, or
//! as fast as possible for headless runs.
//!
//! The engine is created inside the loop because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Snapshots are stored in shared state
//! for polling.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, info};

use skyshield_core::constants::TICK_RATE;
use skyshield_core::events::GameEvent;
use skyshield_core::state::GameStateSnapshot;
use skyshield_sim::engine::{SimConfig, SimulationEngine};

use crate::autopilot::Autopilot;
use crate::state::{GameLoopCommand, RunSummary, SharedSnapshot};

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Ticks between periodic status lines.
const STATUS_INTERVAL: u64 = TICK_RATE as u64 * 10;

/// How a loop run is driven.
#[derive(Debug, Clone, Default)]
pub struct LoopOptions {
    /// Stop after this many ticks. `None` runs until shutdown.
    pub max_ticks: Option<u64>,
    /// Built-in player; `None` leaves all input to the command channel.
    pub autopilot: Option<Autopilot>,
}

/// Spawns the paced game loop in a new thread.
///
/// Returns the command sender for the input layer and a handle yielding
/// the run summary when the loop ends.
pub fn spawn_game_loop(
    config: SimConfig,
    options: LoopOptions,
    latest_snapshot: SharedSnapshot,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<RunSummary>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("skyshield-game-loop".into())
        .spawn(move || run_game_loop(config, options, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// The paced game loop. Runs until Shutdown, channel disconnect, or the
/// tick limit.
fn run_game_loop(
    config: SimConfig,
    mut options: LoopOptions,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &SharedSnapshot,
) -> RunSummary {
    let mut engine = SimulationEngine::new(config);
    let mut summary = RunSummary::default();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return summary,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return summary,
            }
        }

        // 2. Advance one tick and let the autopilot react
        let snapshot = step(&mut engine, options.autopilot.as_mut(), &mut summary);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if options.max_ticks.is_some_and(|max| summary.ticks >= max) {
            return summary;
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset the schedule
            next_tick_time = now;
        }
    }
}

/// Run `ticks` ticks back to back on the calling thread.
pub fn run_headless(config: SimConfig, ticks: u64, mut autopilot: Option<Autopilot>) -> RunSummary {
    let mut engine = SimulationEngine::new(config);
    let mut summary = RunSummary::default();
    for _ in 0..ticks {
        step(&mut engine, autopilot.as_mut(), &mut summary);
    }
    summary
}

/// One loop iteration: tick, record, log, and queue the autopilot's reply.
fn step(
    engine: &mut SimulationEngine,
    autopilot: Option<&mut Autopilot>,
    summary: &mut RunSummary,
) -> GameStateSnapshot {
    let snapshot = engine.tick();
    summary.observe(&snapshot);
    log_snapshot(&snapshot, summary.ticks);

    if let Some(pilot) = autopilot {
        if let Some(command) = pilot.decide(&snapshot) {
            engine.queue_command(command);
        }
    }
    snapshot
}

fn log_snapshot(snapshot: &GameStateSnapshot, loop_tick: u64) {
    for event in &snapshot.events {
        if let GameEvent::PhaseChanged { from, to } = event {
            info!(
                "{from:?} -> {to:?} (level {}, score {}, total {})",
                snapshot.level, snapshot.score, snapshot.total_score
            );
        }
    }
    if loop_tick % STATUS_INTERVAL == 0 {
        debug!(
            "tick {} {:?} level {} score {}/{} ammo {} attackers {} aircraft {}",
            snapshot.time.tick,
            snapshot.phase,
            snapshot.level,
            snapshot.score,
            snapshot.level_target,
            snapshot.total_ammo(),
            snapshot.attackers.len(),
            snapshot.aircraft.len(),
        );
    }
}
