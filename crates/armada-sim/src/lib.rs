//! Simulation engine for ARMADA.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces WorldSnapshots for hosts.

pub mod engine;
pub mod feedback;
pub mod handles;
pub mod systems;
pub mod world_setup;

pub use armada_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use world_setup::PlacementReport;
