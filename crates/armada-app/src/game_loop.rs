//! Game loop: drives the simulation engine until it is told to stop.
//!
//! In real-time mode the engine is moved into a dedicated thread paced at the
//! tick rate. Commands arrive via an `mpsc` channel and the latest snapshot is
//! stored in shared state for polling. Batch mode runs the same loop body
//! back to back on the caller's thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use armada_core::commands::HostCommand;
use armada_core::constants::TICK_RATE;
use armada_core::state::WorldSnapshot;
use armada_sim::SimulationEngine;

use crate::cli::AppError;
use crate::report::FleetReport;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A host command to forward to the simulation engine.
    Host(HostCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, shared with the game loop thread.
pub type SnapshotSlot = Arc<Mutex<Option<WorldSnapshot>>>;

/// When to stop and how often to report.
#[derive(Debug, Clone, Copy)]
pub struct RunLimits {
    pub max_ticks: u64,
    /// Fleet report interval in ticks; 0 disables.
    pub report_every: u64,
    /// End the run once the battle is decided. Interactive hosts keep
    /// running so the battle can be restarted.
    pub stop_when_decided: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// One or no cores remain.
    Decided,
    TickLimit,
    Shutdown,
}

/// How a run ended, with the last snapshot taken.
#[derive(Debug)]
pub struct RunSummary {
    pub reason: StopReason,
    pub snapshot: WorldSnapshot,
}

/// Periodic fleet reports, at most once per simulated tick.
struct Reporter {
    every: u64,
    last: Option<u64>,
}

impl Reporter {
    fn new(every: u64) -> Self {
        Self { every, last: None }
    }

    fn observe(&mut self, snapshot: &WorldSnapshot) {
        let tick = snapshot.time.tick;
        if self.every == 0 || tick == 0 || tick % self.every != 0 || self.last == Some(tick) {
            return;
        }
        self.last = Some(tick);
        FleetReport::from_snapshot(snapshot).log();
    }
}

fn stop_reason(engine: &SimulationEngine, limits: RunLimits) -> Option<StopReason> {
    if limits.stop_when_decided && engine.is_terminal() {
        Some(StopReason::Decided)
    } else if engine.time().tick >= limits.max_ticks {
        Some(StopReason::TickLimit)
    } else {
        None
    }
}

/// Run the engine as fast as possible until it stops.
pub fn run_headless(engine: &mut SimulationEngine, limits: RunLimits) -> RunSummary {
    let mut reporter = Reporter::new(limits.report_every);
    loop {
        let snapshot = engine.tick();
        reporter.observe(&snapshot);
        if let Some(reason) = stop_reason(engine, limits) {
            return RunSummary { reason, snapshot };
        }
    }
}

/// Spawns the paced game loop in a new thread.
///
/// Returns the command sender and the handle yielding the run summary.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    limits: RunLimits,
    latest_snapshot: SnapshotSlot,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<RunSummary>), AppError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("armada-game-loop".into())
        .spawn(move || run_game_loop(engine, limits, cmd_rx, &latest_snapshot))
        .map_err(|source| AppError::Thread {
            what: "game loop",
            source,
        })?;

    Ok((cmd_tx, handle))
}

/// The paced loop. Runs until the battle stops, a Shutdown command arrives,
/// or the channel disconnects.
fn run_game_loop(
    mut engine: SimulationEngine,
    limits: RunLimits,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<WorldSnapshot>>,
) -> RunSummary {
    let mut reporter = Reporter::new(limits.report_every);
    let mut announced = false;
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Host(cmd)) => {
                    info!(command = ?cmd, "host command");
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    return RunSummary {
                        reason: StopReason::Shutdown,
                        snapshot: engine.snapshot(),
                    };
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        reporter.observe(&snapshot);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }

        if engine.is_terminal() != announced {
            announced = engine.is_terminal();
            if announced {
                info!(outcome = ?snapshot.outcome, tick = snapshot.time.tick, "battle decided; r restarts, q quits");
            }
        }
        if let Some(reason) = stop_reason(&engine, limits) {
            return RunSummary { reason, snapshot };
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: reset instead of catching up in a burst
            warn!(behind_ms = (now - next_tick_time).as_millis() as u64, "game loop fell behind");
            next_tick_time = now;
        }
    }
}

/// Parse an interactive command line.
pub fn parse_command(line: &str) -> Option<GameLoopCommand> {
    let command = match line.trim().to_ascii_lowercase().as_str() {
        "pause" => GameLoopCommand::Host(HostCommand::Pause),
        "resume" => GameLoopCommand::Host(HostCommand::Resume),
        "p" | "toggle" => GameLoopCommand::Host(HostCommand::TogglePause),
        "r" | "restart" => GameLoopCommand::Host(HostCommand::Restart),
        "q" | "quit" | "exit" => GameLoopCommand::Shutdown,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use armada_core::config::GameConfig;
    use armada_core::enums::{Outcome, SimPhase};
    use armada_sim::SimConfig;

    fn engine(factions: u32) -> SimulationEngine {
        SimulationEngine::new(SimConfig {
            seed: 4,
            game: GameConfig {
                num_factions: factions,
                ..Default::default()
            },
        })
        .unwrap()
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Host(HostCommand::Pause)).unwrap();
        tx.send(GameLoopCommand::Host(HostCommand::Restart)).unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Host(HostCommand::Pause)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Host(HostCommand::Restart)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_parse_command() {
        assert!(matches!(
            parse_command(" P \n"),
            Some(GameLoopCommand::Host(HostCommand::TogglePause))
        ));
        assert!(matches!(
            parse_command("restart"),
            Some(GameLoopCommand::Host(HostCommand::Restart))
        ));
        assert!(matches!(parse_command("q"), Some(GameLoopCommand::Shutdown)));
        assert!(parse_command("launch").is_none());
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = engine(6);
        for _ in 0..300 {
            engine.tick();
        }

        let snapshot = engine.tick();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_headless_run_stops_at_tick_limit() {
        let mut engine = engine(6);
        let summary = run_headless(
            &mut engine,
            RunLimits {
                max_ticks: 90,
                report_every: 30,
                stop_when_decided: true,
            },
        );
        assert_eq!(summary.reason, StopReason::TickLimit);
        assert_eq!(summary.snapshot.time.tick, 90);
    }

    #[test]
    fn test_headless_run_stops_when_decided() {
        let mut engine = engine(1);
        let summary = run_headless(
            &mut engine,
            RunLimits {
                max_ticks: 1_000,
                report_every: 0,
                stop_when_decided: true,
            },
        );
        assert_eq!(summary.reason, StopReason::Decided);
        assert_eq!(summary.snapshot.outcome, Outcome::Victory { faction: 0 });
        assert_eq!(summary.snapshot.time.tick, 1);
    }

    #[test]
    fn test_game_loop_thread_pause_and_shutdown() {
        let slot: SnapshotSlot = Arc::new(Mutex::new(None));
        let limits = RunLimits {
            max_ticks: u64::MAX,
            report_every: 0,
            stop_when_decided: false,
        };
        let (tx, handle) = spawn_game_loop(engine(6), limits, slot.clone()).unwrap();

        tx.send(GameLoopCommand::Host(HostCommand::Pause)).unwrap();
        std::thread::sleep(Duration::from_millis(100));
        let paused = slot.lock().unwrap().as_ref().map(|s| (s.phase, s.time.tick));
        assert!(matches!(paused, Some((SimPhase::Paused, _))));

        tx.send(GameLoopCommand::Shutdown).unwrap();
        let summary = handle.join().unwrap();
        assert_eq!(summary.reason, StopReason::Shutdown);
        assert_eq!(summary.snapshot.phase, SimPhase::Paused);
        assert_eq!(Some(summary.snapshot.time.tick), paused.map(|(_, t)| t));
    }

    #[test]
    fn test_interactive_loop_outlives_decided_battle() {
        let slot: SnapshotSlot = Arc::new(Mutex::new(None));
        let limits = RunLimits {
            max_ticks: u64::MAX,
            report_every: 0,
            stop_when_decided: false,
        };
        // A single faction is decided from the first tick.
        let (tx, handle) = spawn_game_loop(engine(1), limits, slot.clone()).unwrap();

        std::thread::sleep(Duration::from_millis(300));
        assert!(!handle.is_finished(), "loop should wait for a restart or quit");
        let before = slot.lock().unwrap().as_ref().map(|s| s.time.tick).unwrap();
        assert!(before > 0);

        tx.send(GameLoopCommand::Host(HostCommand::Restart)).unwrap();
        std::thread::sleep(Duration::from_millis(50));
        let after = slot.lock().unwrap().as_ref().map(|s| s.time.tick).unwrap();
        assert!(after < before, "restart resets the clock: {before} -> {after}");

        tx.send(GameLoopCommand::Shutdown).unwrap();
        let summary = handle.join().unwrap();
        assert_eq!(summary.reason, StopReason::Shutdown);
        assert_eq!(summary.snapshot.outcome, Outcome::Victory { faction: 0 });
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.667ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
