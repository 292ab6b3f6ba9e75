//! Command-line arguments and configuration loading.

use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;

use armada_core::config::{ConfigError, GameConfig};
use armada_sim::SimConfig;

/// Host-side failures. All of them end the process with a non-zero exit.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config JSON in {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to start {what} thread: {source}")]
    Thread {
        what: &'static str,
        source: std::io::Error,
    },

    #[error("game loop thread panicked")]
    GameLoopPanicked,

    #[error("failed to write snapshot: {0}")]
    Output(#[from] serde_json::Error),
}

/// ARMADA: headless fleet battle simulation
#[derive(Parser, Debug)]
#[command(name = "armada")]
#[command(about = "Run an autonomous fleet battle between faction cores")]
pub struct Args {
    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of factions (overrides the config file)
    #[arg(long)]
    pub factions: Option<u32>,

    /// Number of map objects (overrides the config file)
    #[arg(long)]
    pub objects: Option<u32>,

    /// JSON file with tuning overrides; missing fields keep their defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Stop after this many ticks even if the battle is undecided
    #[arg(long, default_value_t = 36_000)]
    pub max_ticks: u64,

    /// Pace the simulation at 60 Hz on a game-loop thread and read commands
    /// (pause, resume, p, r, q) from stdin; runs until q or the tick limit
    #[arg(long)]
    pub realtime: bool,

    /// Log a fleet report every N ticks (0 disables)
    #[arg(long, default_value_t = 600)]
    pub report_every: u64,

    /// Default log filter; RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the final snapshot as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Config file (if any) with the command-line overrides applied, validated.
    pub fn game_config(&self) -> Result<GameConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => GameConfig::default(),
        };
        if let Some(factions) = self.factions {
            config.num_factions = factions;
        }
        if let Some(objects) = self.objects {
            config.map_objects_count = objects;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn sim_config(&self) -> Result<SimConfig, AppError> {
        Ok(SimConfig {
            seed: self.seed,
            game: self.game_config()?,
        })
    }
}

/// Read a (possibly partial) `GameConfig` from a JSON file.
pub fn read_config(path: &Path) -> Result<GameConfig, AppError> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AppError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}
