//! World snapshot: the read-only view handed to presentation after a tick.

use serde::{Deserialize, Serialize};

use crate::components::Modifier;
use crate::enums::*;
use crate::events::{EffectRequest, SimEvent};
use crate::types::{EntityId, Position, SimTime, Velocity};

/// Complete visible state of the arena.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub outcome: Outcome,
    /// Camera-shake style scalar, decays by one per tick.
    pub impact_feedback: u32,
    /// Living cores in faction order, each with its ship roster.
    pub cores: Vec<CoreView>,
    pub projectiles: Vec<ProjectileView>,
    pub map_objects: Vec<MapObjectView>,
    /// Effect requests raised by the most recent step.
    pub effects: Vec<EffectRequest>,
    /// Simulation events raised by the most recent step.
    pub events: Vec<SimEvent>,
}

/// A faction core and its fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreView {
    pub id: EntityId,
    pub faction: u32,
    pub position: Position,
    pub velocity: Velocity,
    pub radius: f64,
    pub health: f64,
    pub max_health: f64,
    pub shield: f64,
    pub max_shield: f64,
    pub resources: f64,
    pub max_ships: usize,
    pub flashing: bool,
    pub kills: u32,
    pub ships_lost: u32,
    pub damage_dealt: f64,
    pub damage_taken: f64,
    pub ships: Vec<ShipView>,
}

/// A single ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub id: EntityId,
    pub faction: u32,
    pub position: Position,
    pub heading: f64,
    pub length: f64,
    pub width: f64,
    pub health: f64,
    pub max_health: f64,
    pub state: ShipState,
    pub target: Option<Target>,
    pub moving: bool,
    pub flashing: bool,
    pub buffs: Vec<Modifier>,
    pub debuffs: Vec<Modifier>,
    pub kills: u32,
    pub damage_dealt: f64,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub velocity: Velocity,
    pub color: EffectColor,
    pub lifetime_ticks: u32,
}

/// A map object, active or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapObjectView {
    pub kind: MapObjectKind,
    pub position: Position,
    pub size: f64,
    pub active: bool,
    pub pulse_phase: f64,
    pub outline: Vec<Position>,
}
