//! `armada`: run a fleet battle from the command line.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use armada_app::cli::{AppError, Args};
use armada_app::game_loop::{self, RunLimits, RunSummary, SnapshotSlot};
use armada_app::report::FleetReport;
use armada_sim::SimulationEngine;

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "armada failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let config = args.sim_config()?;
    let seed = config.seed;
    let mut engine = SimulationEngine::new(config)?;
    let placement = engine.placement();
    info!(
        seed,
        cores = placement.cores_placed,
        objects = placement.objects_placed,
        realtime = args.realtime,
        "battle starting"
    );

    let limits = RunLimits {
        max_ticks: args.max_ticks,
        report_every: args.report_every,
        stop_when_decided: !args.realtime,
    };
    let summary = if args.realtime {
        run_realtime(engine, limits)?
    } else {
        game_loop::run_headless(&mut engine, limits)
    };

    let report = FleetReport::from_snapshot(&summary.snapshot);
    report.log();
    info!(
        reason = ?summary.reason,
        outcome = ?summary.snapshot.outcome,
        tick = summary.snapshot.time.tick,
        elapsed_secs = summary.snapshot.time.elapsed_secs,
        "battle finished"
    );

    if args.json {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer(&mut stdout, &summary.snapshot)?;
        let _ = writeln!(stdout);
    } else {
        print!("{report}");
    }
    Ok(())
}

/// Paced loop on its own thread; stdin lines become host commands.
fn run_realtime(engine: SimulationEngine, limits: RunLimits) -> Result<RunSummary, AppError> {
    let slot: SnapshotSlot = Arc::new(Mutex::new(None));
    let (cmd_tx, handle) = game_loop::spawn_game_loop(engine, limits, slot)?;

    let input_tx = cmd_tx.clone();
    std::thread::Builder::new()
        .name("armada-input".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                match game_loop::parse_command(&line) {
                    Some(cmd) => {
                        if input_tx.send(cmd).is_err() {
                            break;
                        }
                    }
                    None => warn!(input = line.trim(), "unknown command"),
                }
            }
        })
        .map_err(|source| AppError::Thread {
            what: "input",
            source,
        })?;

    let summary = handle.join().map_err(|_| AppError::GameLoopPanicked)?;
    drop(cmd_tx);
    Ok(summary)
}
