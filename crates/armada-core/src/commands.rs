//! Host commands sent to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All host-side controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostCommand {
    /// Stop advancing the simulation.
    Pause,
    /// Continue after a pause.
    Resume,
    /// Pause if running, resume if paused.
    TogglePause,
    /// Rebuild the world from the current configuration.
    Restart,
}
