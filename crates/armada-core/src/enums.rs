//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Ship behaviour state, evaluated every tick by the ship AI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipState {
    /// Roam around the patrol center.
    #[default]
    Patrol,
    /// Engage a nearby enemy ship.
    AttackShip,
    /// Close on and fire at an enemy core.
    AssaultCore,
    /// Fall back to the patrol center and regenerate.
    Retreat,
}

/// What a ship or projectile is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Ship(EntityId),
    Core(EntityId),
}

/// Map object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapObjectKind {
    /// Repels cores. Carries a cosmetic outline.
    Obstacle,
    /// Heals the ship that picks it up.
    Resource,
    /// Timed speed and damage multiplier.
    Buff,
    /// Timed speed penalty.
    Debuff,
}

/// Top-level run state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Running,
    Paused,
}

/// Result of the battle so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Outcome {
    /// Two or more cores remain.
    #[default]
    InProgress,
    /// Exactly one core remains.
    Victory { faction: u32 },
    /// Every core has been destroyed.
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Color tag carried by effect requests and projectiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectColor {
    /// The palette color of a faction.
    Faction(u32),
    /// The green used for retreat healing.
    Heal,
}
