//! Events emitted by the simulation for presentation and logging.
//!
//! Nothing here is ever read back by the simulation.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityId, Position};

/// Fire-and-forget request for a cosmetic particle burst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectRequest {
    pub position: Position,
    pub color: EffectColor,
    pub particle_count: u32,
    /// Particle radius range.
    pub size_range: (f64, f64),
    /// Particle lifetime range in ticks.
    pub duration_range: (u32, u32),
}

impl EffectRequest {
    /// Large burst when a core is destroyed.
    pub fn core_destroyed(position: Position, faction: u32) -> Self {
        Self {
            position,
            color: EffectColor::Faction(faction),
            particle_count: 300,
            size_range: (5.0, 15.0),
            duration_range: (120, 240),
        }
    }

    /// Burst when a ship is destroyed.
    pub fn ship_destroyed(position: Position, faction: u32) -> Self {
        Self {
            position,
            color: EffectColor::Faction(faction),
            particle_count: 80,
            size_range: (2.0, 6.0),
            duration_range: (30, 60),
        }
    }

    /// Small spark where a projectile lands.
    pub fn projectile_hit(position: Position, color: EffectColor) -> Self {
        Self {
            position,
            color,
            particle_count: 25,
            size_range: (2.0, 5.0),
            duration_range: (20, 40),
        }
    }

    /// Trickle of green particles around a retreating ship.
    pub fn heal(position: Position) -> Self {
        Self {
            position,
            color: EffectColor::Heal,
            particle_count: 2,
            size_range: (1.0, 3.0),
            duration_range: (10, 20),
        }
    }
}

/// Structured simulation events for hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    ShipSpawned {
        ship: EntityId,
        faction: u32,
    },
    ShipDestroyed {
        ship: EntityId,
        faction: u32,
        /// Faction of the shooter, when known.
        killer_faction: Option<u32>,
    },
    CoreDestroyed {
        faction: u32,
    },
    ObjectPickedUp {
        kind: MapObjectKind,
        faction: u32,
    },
    ObjectRespawned {
        kind: MapObjectKind,
        position: Position,
    },
}
