//! Simulation engine: owns the world and drives one tick at a time.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyshield_core::commands::{CommandOutcome, PlayerCommand};
use skyshield_core::config::GameConfig;
use skyshield_core::constants::DEFAULT_SEED;
use skyshield_core::enums::{FormationKind, GamePhase};
use skyshield_core::error::CommandError;
use skyshield_core::events::GameEvent;
use skyshield_core::state::GameStateSnapshot;
use skyshield_core::types::SimTime;
use skyshield_threat_ai::profiles::RaidProfile;

use crate::progression;
use crate::score::ScoreState;
use crate::systems;
use crate::systems::formation::FormationState;
use crate::systems::snapshot::SnapshotContext;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Tuning parameters. Callers loading external config should run
    /// `GameConfig::validate` first.
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: GameConfig,
    seed: u64,
    time: SimTime,
    phase: GamePhase,
    level: u32,
    score: ScoreState,
    raid: RaidProfile,
    formation: FormationState,
    rng: ChaCha8Rng,
    next_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    /// The world stays empty until the game is started.
    pub fn new(config: SimConfig) -> Self {
        let raid = RaidProfile::for_level(1, &config.game);
        Self {
            world: World::new(),
            config: config.game,
            seed: config.seed,
            time: SimTime::default(),
            phase: GamePhase::default(),
            level: 1,
            score: ScoreState::default(),
            raid,
            formation: FormationState::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply a command immediately, reporting the outcome.
    pub fn apply_command(
        &mut self,
        command: PlayerCommand,
    ) -> Result<CommandOutcome, CommandError> {
        match command {
            PlayerCommand::Fire { x, y } => self.fire(x, y),
            PlayerCommand::StartGame => self.start_game().map(|_| CommandOutcome::Transitioned),
            PlayerCommand::NextLevel => self.next_level().map(|_| CommandOutcome::Transitioned),
            PlayerCommand::Restart => self.restart().map(|_| CommandOutcome::Transitioned),
            PlayerCommand::Pause => self.pause().map(|_| CommandOutcome::Transitioned),
            PlayerCommand::Resume => self.resume().map(|_| CommandOutcome::Transitioned),
        }
    }

    /// Launch an interceptor toward `(x, y)` from the nearest battery that can fire.
    ///
    /// Non-finite coordinates are rejected; finite ones outside the arena are
    /// clamped to it. With no eligible battery nothing happens and
    /// `CommandOutcome::NoEligibleBattery` is returned.
    pub fn fire(&mut self, x: f64, y: f64) -> Result<CommandOutcome, CommandError> {
        if self.phase != GamePhase::Playing {
            return Err(CommandError::NotPlaying { phase: self.phase });
        }
        if !x.is_finite() || !y.is_finite() {
            return Err(CommandError::NonFiniteTarget { x, y });
        }

        let target = systems::fire_control::clamp_to_arena(x, y, &self.config);
        match systems::fire_control::fire(&mut self.world, &self.config, &mut self.next_id, target)
        {
            Some(launch) => {
                self.score.interceptors_fired += 1;
                self.events.push(GameEvent::InterceptorLaunched {
                    interceptor_id: launch.interceptor_id,
                    battery_id: launch.battery_id,
                });
                Ok(CommandOutcome::Launched {
                    interceptor_id: launch.interceptor_id,
                    battery_id: launch.battery_id,
                })
            }
            None => {
                debug!("fire at ({x:.1}, {y:.1}) ignored: no battery can fire");
                Ok(CommandOutcome::NoEligibleBattery)
            }
        }
    }

    /// Leave the start screen and set up level 1.
    pub fn start_game(&mut self) -> Result<(), CommandError> {
        let next = progression::transition(self.phase, &PlayerCommand::StartGame)?;
        self.reset_game();
        self.set_phase(next);
        info!("game started (seed {})", self.seed);
        Ok(())
    }

    /// Advance from LevelUp to the next level. The level score resets,
    /// battery ammunition carries over, and ground targets are repaired.
    pub fn next_level(&mut self) -> Result<(), CommandError> {
        let next = progression::transition(self.phase, &PlayerCommand::NextLevel)?;
        self.level += 1;
        self.score.reset_level();
        self.raid = RaidProfile::for_level(self.level, &self.config);
        self.formation = FormationState::default();
        world_setup::clear_transients(&mut self.world, &mut self.despawn_buffer);
        world_setup::repair_ground_targets(&mut self.world);
        world_setup::seed_debris(&mut self.world, &mut self.rng, &self.config, &mut self.next_id);
        self.set_phase(next);
        info!(
            "level {} (target {})",
            self.level,
            progression::level_target(self.level, &self.config.scoring)
        );
        Ok(())
    }

    /// Reinitialize everything, including the RNG, and start at level 1.
    /// Two restarts in a row produce identical state.
    pub fn restart(&mut self) -> Result<(), CommandError> {
        let next = progression::transition(self.phase, &PlayerCommand::Restart)?;
        self.reset_game();
        self.set_phase(next);
        info!("game restarted");
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), CommandError> {
        let next = progression::transition(self.phase, &PlayerCommand::Pause)?;
        self.set_phase(next);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), CommandError> {
        let next = progression::transition(self.phase, &PlayerCommand::Resume)?;
        self.set_phase(next);
        Ok(())
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    /// Events raised since the previous tick are drained into the snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing {
            self.run_systems();
            self.time.advance();
            self.judge();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, self.snapshot_context(), events)
    }

    /// Current state without advancing. Pending events are included but not drained.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(&self.world, self.snapshot_context(), self.events.clone())
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Get the score and combat statistics.
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn formation(&self) -> FormationKind {
        self.formation.current
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for tests that place entities directly.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Spawn an attacker directly (for tests needing a known threat).
    #[cfg(test)]
    pub fn spawn_test_attacker(
        &mut self,
        start: skyshield_core::types::Position,
        target: skyshield_core::types::Position,
        speed: f64,
    ) -> u32 {
        world_setup::spawn_attacker(&mut self.world, &mut self.next_id, start, target, speed, 0)
    }

    /// Spawn a single aircraft directly (for tests needing a known launcher).
    #[cfg(test)]
    pub fn spawn_test_aircraft(
        &mut self,
        position: skyshield_core::types::Position,
        direction: skyshield_core::enums::FlightDirection,
        health: skyshield_core::components::Health,
    ) -> u32 {
        let id = world_setup::alloc_id(&mut self.next_id);
        self.world.spawn((
            skyshield_core::components::Aircraft {
                id,
                target_altitude: position.y,
                speed: 1.0,
                direction,
                last_fired_ms: None,
            },
            position,
            health,
        ));
        id
    }

    /// Award points directly (for progression tests).
    #[cfg(test)]
    pub fn award_test_points(&mut self, points: u32) {
        self.score.award(points);
    }

    /// Jump to a level without playing through (for progression tests).
    #[cfg(test)]
    pub fn set_test_level(&mut self, level: u32) {
        self.level = level;
        self.raid = RaidProfile::for_level(level, &self.config);
    }

    /// Process all queued commands. Rejected commands are logged and dropped.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            let name = command.name();
            if let Err(err) = self.apply_command(command) {
                warn!("{name} rejected: {err}");
            }
        }
    }

    /// Wipe the world and score, reseed the RNG, and set up level 1.
    fn reset_game(&mut self) {
        self.world.clear();
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.time = SimTime::default();
        self.level = 1;
        self.score = ScoreState::default();
        self.raid = RaidProfile::for_level(1, &self.config);
        self.formation = FormationState::default();
        self.next_id = 0;
        self.events.clear();
        world_setup::setup_game(&mut self.world, &mut self.rng, &self.config, &mut self.next_id);
    }

    fn set_phase(&mut self, next: GamePhase) {
        if next != self.phase {
            debug!("phase {:?} -> {:?}", self.phase, next);
        }
        self.events.push(GameEvent::PhaseChanged {
            from: self.phase,
            to: next,
        });
        self.phase = next;
    }

    /// Apply the end-of-tick progression rules.
    fn judge(&mut self) {
        let live = world_setup::live_battery_count(&self.world);
        if let Some(next) = progression::judge(
            self.phase,
            self.level,
            self.score.level_score,
            live,
            &self.config.scoring,
        ) {
            info!(
                "level {} ended {:?} at tick {} (score {}, total {})",
                self.level, next, self.time.tick, self.score.level_score, self.score.total_score
            );
            self.set_phase(next);
        }
    }

    fn snapshot_context(&self) -> SnapshotContext<'_> {
        SnapshotContext {
            time: &self.time,
            phase: self.phase,
            level: self.level,
            level_target: progression::level_target(self.level, &self.config.scoring),
            formation: self.formation.current,
            score: &self.score,
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Spawner (attackers, aircraft raids, debris)
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &self.config,
            &self.raid,
            &mut self.next_id,
            self.time.elapsed_ms(),
            &mut self.events,
        );
        // 2. Battery formation
        if let Some(formation) = systems::formation::run(
            &mut self.world,
            &mut self.formation,
            &self.config.formation,
            self.config.batteries.len(),
        ) {
            debug!("formation -> {formation:?}");
            self.events.push(GameEvent::FormationChanged { formation });
        }
        // 3. Movement integration
        systems::movement::run(&mut self.world, &self.config.aircraft);
        // 4. Impacts, beams, blasts
        systems::collision::run(
            &mut self.world,
            &self.config,
            &mut self.score,
            &mut self.next_id,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 5. Cleanup (off-arena debris and aircraft)
        systems::cleanup::run(&mut self.world, &self.config, &mut self.despawn_buffer);
    }
}
