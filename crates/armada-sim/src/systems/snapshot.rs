//! Snapshot system: queries the ECS world and builds a complete WorldSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use armada_core::components::*;
use armada_core::enums::*;
use armada_core::state::*;
use armada_core::types::{Position, SimTime, Velocity};

use crate::feedback::Feedback;
use crate::handles::{entity_of, id_of};
use crate::systems::cores;

/// Build a complete WorldSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: SimPhase,
    outcome: Outcome,
    feedback: &Feedback,
) -> WorldSnapshot {
    WorldSnapshot {
        time: *time,
        phase,
        outcome,
        impact_feedback: feedback.impact,
        cores: build_cores(world),
        projectiles: build_projectiles(world),
        map_objects: build_map_objects(world),
        effects: feedback.effects.clone(),
        events: feedback.events.clone(),
    }
}

/// Living cores in faction order, each with its roster.
fn build_cores(world: &World) -> Vec<CoreView> {
    cores::living(world)
        .into_iter()
        .filter_map(|(core, _)| build_core(world, core))
        .collect()
}

fn build_core(world: &World, core: Entity) -> Option<CoreView> {
    let mut query = world
        .query_one::<(
            &Faction,
            &Position,
            &Velocity,
            &CoreBody,
            &Health,
            &Shield,
            &Shipyard,
            &DamageFlash,
            &CoreStats,
        )>(core)
        .ok()?;
    let (faction, pos, vel, body, health, shield, yard, flash, stats) = query.get()?;

    Some(CoreView {
        id: id_of(core),
        faction: faction.0,
        position: *pos,
        velocity: *vel,
        radius: body.radius,
        health: health.current,
        max_health: health.max,
        shield: shield.energy,
        max_shield: shield.max,
        resources: yard.resources,
        max_ships: yard.max_ships,
        flashing: flash.ticks > 0,
        kills: stats.kills,
        ships_lost: stats.ships_lost,
        damage_dealt: stats.damage_dealt,
        damage_taken: stats.damage_taken,
        ships: yard
            .roster
            .iter()
            .filter_map(|id| entity_of(*id))
            .filter_map(|ship| build_ship(world, ship))
            .collect(),
    })
}

fn build_ship(world: &World, ship: Entity) -> Option<ShipView> {
    let mut query = world
        .query_one::<(
            &Faction,
            &Position,
            &Helm,
            &Health,
            &Pilot,
            &DamageFlash,
            &Modifiers,
            &ShipStats,
        )>(ship)
        .ok()?;
    let (faction, pos, helm, health, pilot, flash, mods, stats) = query.get()?;

    Some(ShipView {
        id: id_of(ship),
        faction: faction.0,
        position: *pos,
        heading: helm.heading,
        length: helm.length,
        width: helm.width,
        health: health.current,
        max_health: health.max,
        state: pilot.state,
        target: pilot.target,
        moving: helm.moving,
        flashing: flash.ticks > 0,
        buffs: mods.buffs.clone(),
        debuffs: mods.debuffs.clone(),
        kills: stats.kills,
        damage_dealt: stats.damage_dealt,
    })
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Position, &Velocity, &Projectile)>()
        .iter()
        .map(|(_, (pos, vel, projectile))| ProjectileView {
            position: *pos,
            velocity: *vel,
            color: projectile.color,
            lifetime_ticks: projectile.lifetime_ticks,
        })
        .collect()
}

fn build_map_objects(world: &World) -> Vec<MapObjectView> {
    world
        .query::<(&Position, &MapObject)>()
        .iter()
        .map(|(_, (pos, object))| MapObjectView {
            kind: object.kind,
            position: *pos,
            size: object.size,
            active: object.active,
            pulse_phase: object.pulse_phase,
            outline: object.outline.clone(),
        })
        .collect()
}
