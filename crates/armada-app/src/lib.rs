//! ARMADA headless host.
//!
//! This crate wires the simulation engine to the command line: configuration
//! loading, a paced game-loop thread with a command channel, and fleet reports.

pub mod cli;
pub mod game_loop;
pub mod report;

pub use armada_core as core;
