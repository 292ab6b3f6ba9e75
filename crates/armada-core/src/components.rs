//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.
//!
//! Cores and ships both carry `Position`, `Faction` and `Health`; that trio is
//! everything a shooter needs to know about its target.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityId, Position};

/// Owning faction. Never changes after spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction(pub u32);

/// Hit points, kept within `[0, max]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

/// Ticks left on the white hit flash.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DamageFlash {
    pub ticks: u32,
}

/// Marks an entity as a faction core.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FactionCore;

/// Physical body of a core.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoreBody {
    pub radius: f64,
    pub mass: f64,
}

/// Core shield. Soaks part of incoming damage and regenerates over time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shield {
    pub energy: f64,
    pub max: f64,
    /// Regeneration per second.
    pub recharge_rate: f64,
}

/// Core economy and ship production.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipyard {
    pub resources: f64,
    pub resource_cap: f64,
    pub production_cost: f64,
    /// Ticks accumulated toward the next ship.
    pub spawn_timer: u32,
    pub spawn_interval: u32,
    pub max_ships: usize,
    /// Ships owned by this core, in spawn order.
    pub roster: Vec<EntityId>,
}

/// Cumulative faction statistics, kept on the core.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CoreStats {
    /// Enemy ships destroyed by this faction's fire.
    pub kills: u32,
    /// Own ships destroyed.
    pub ships_lost: u32,
    pub damage_dealt: f64,
    /// Damage that got through the shield.
    pub damage_taken: f64,
}

/// Marks an entity as a ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ship;

/// Core that built and owns this ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OwnedBy(pub EntityId);

/// Ship hull and propulsion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Helm {
    /// Current heading in radians, kept within [-π, π) once the ship has turned.
    pub heading: f64,
    /// Base speed (units/s) before modifiers.
    pub speed: f64,
    /// Maximum turn rate (rad/s).
    pub turn_rate: f64,
    pub length: f64,
    pub width: f64,
    pub mass: f64,
    /// Whether the ship advanced this tick.
    pub moving: bool,
}

/// Forward-firing weapon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weapon {
    pub damage: f64,
    pub range: f64,
    /// Full cone width in radians; targets within half of it either side may be fired on.
    pub cone_angle: f64,
    pub cooldown_max: u32,
    pub cooldown: u32,
}

/// Ship AI state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pilot {
    pub state: ShipState,
    pub target: Option<Target>,
    /// Spawn point; fixed for the ship's lifetime.
    pub patrol_center: Position,
    pub patrol_radius: f64,
    pub waypoint: Position,
    /// Regeneration per second while retreating.
    pub retreat_heal_rate: f64,
    pub heal_particle_timer: u32,
}

/// A timed multiplicative effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub factor: f64,
    pub remaining_ticks: u32,
}

/// Active buffs and debuffs, in pickup order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub buffs: Vec<Modifier>,
    pub debuffs: Vec<Modifier>,
}

/// Per-ship statistics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ShipStats {
    pub kills: u32,
    pub damage_dealt: f64,
}

/// Unguided shot flying along a fixed velocity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub target: Target,
    pub damage: f64,
    pub lifetime_ticks: u32,
    pub color: EffectColor,
    pub shooter: EntityId,
    pub shooter_faction: u32,
}

/// Static world item. Never despawned, only toggled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapObject {
    pub kind: MapObjectKind,
    pub size: f64,
    pub active: bool,
    /// Heal amount for resources, multiplier for buffs and debuffs, zero for obstacles.
    pub effect_value: f64,
    /// Effect duration in ticks for buffs and debuffs, zero otherwise.
    pub effect_duration: u32,
    /// Cosmetic animation phase.
    pub pulse_phase: f64,
    /// Irregular outline for obstacles, empty for everything else. Cosmetic only.
    pub outline: Vec<Position>,
}
