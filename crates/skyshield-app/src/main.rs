//! `skyshield` binary: runs the simulation headless or paced at 60 Hz.
//!
//! Usage:
//!   skyshield --ticks 36000
//!   skyshield --realtime --no-autopilot < commands.jsonl
//!
//! In realtime mode each stdin line is a JSON player command, for example
//! `{"type":"Fire","x":400,"y":250}`.

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{info, warn};

use skyshield_app::autopilot::Autopilot;
use skyshield_app::game_loop::{self, LoopOptions};
use skyshield_app::settings::load_config;
use skyshield_app::state::{GameLoopCommand, RunSummary, SharedSnapshot};
use skyshield_core::commands::PlayerCommand;
use skyshield_core::constants::DEFAULT_SEED;
use skyshield_sim::engine::SimConfig;

#[derive(Parser, Debug)]
#[command(name = "skyshield")]
#[command(about = "Deterministic missile-defence simulation with a built-in autopilot")]
struct Cli {
    /// JSON tuning file; fields it omits keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed; the same seed and inputs replay the same game
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Number of ticks to run (60 per simulated second)
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,
    /// Pace the loop at 60 Hz and read JSON commands from stdin
    #[arg(long, default_value_t = false)]
    realtime: bool,
    /// Disable the autopilot
    #[arg(long, default_value_t = false)]
    no_autopilot: bool,
    /// Write the run summary as JSON to this path
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let game = load_config(cli.config.as_deref())?;
    let config = SimConfig {
        seed: cli.seed,
        game,
    };
    let autopilot = (!cli.no_autopilot).then(Autopilot::new);

    info!(
        "SKYSHIELD starting: seed {}, {} ticks, {}",
        cli.seed,
        cli.ticks,
        if cli.realtime { "realtime" } else { "headless" }
    );

    let summary = if cli.realtime {
        run_realtime(config, cli.ticks, autopilot)?
    } else {
        game_loop::run_headless(config, cli.ticks, autopilot)
    };

    info!(
        "finished after {} ticks: {:?} on level {} (best level {}), total score {} (best {})",
        summary.ticks,
        summary.phase,
        summary.level,
        summary.best_level,
        summary.total_score,
        summary.best_total_score
    );
    info!(
        "interceptors {}, attackers down {}, aircraft down {}, impacts {}, won {}, lost {}",
        summary.interceptors_launched,
        summary.attackers_destroyed,
        summary.aircraft_destroyed,
        summary.impacts,
        summary.games_won,
        summary.games_lost
    );

    if let Some(path) = &cli.summary_out {
        let json = serde_json::to_string_pretty(&summary)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
    }
    Ok(())
}

/// Run the paced loop on its own thread, forwarding stdin commands to it.
fn run_realtime(config: SimConfig, ticks: u64, autopilot: Option<Autopilot>) -> Result<RunSummary> {
    let latest: SharedSnapshot = Arc::new(Mutex::new(None));
    let options = LoopOptions {
        max_ticks: Some(ticks),
        autopilot,
    };
    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, options, latest)
        .context("failed to spawn game loop thread")?;

    // Held until the loop ends so stdin EOF does not disconnect it.
    let _keep_open = cmd_tx.clone();
    std::thread::Builder::new()
        .name("skyshield-stdin".into())
        .spawn(move || forward_stdin(cmd_tx))
        .context("failed to spawn stdin reader")?;

    handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))
}

/// Parse each stdin line as a player command until EOF or `quit`.
fn forward_stdin(cmd_tx: mpsc::Sender<GameLoopCommand>) {
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            let _ = cmd_tx.send(GameLoopCommand::Shutdown);
            return;
        }
        match serde_json::from_str::<PlayerCommand>(line) {
            Ok(command) => {
                if cmd_tx.send(GameLoopCommand::PlayerCommand(command)).is_err() {
                    return;
                }
            }
            Err(err) => warn!("ignoring input {line:?}: {err}"),
        }
    }
}
