//! Per-ship update: modifiers, AI, steering, attack, containment, pickups,
//! retreat healing and timers, in that order.

use std::f64::consts::TAU;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use armada_ai::fsm::{self, Destination, ShipContext};
use armada_ai::{modifiers, steering};
use armada_core::components::*;
use armada_core::constants::*;
use armada_core::enums::{MapObjectKind, ShipState};
use armada_core::events::{EffectRequest, SimEvent};
use armada_core::types::{from_heading, Position};

use crate::feedback::Feedback;
use crate::handles::{copied, entity_of, id_of, is_alive, living_position, resolve};
use crate::systems::{shipyard, weapons};
use crate::world_setup::Shot;

/// Read-only lists taken at the start of the tick.
pub struct ShipPass<'a> {
    /// Every ship of every living core, with its faction.
    pub ships: &'a [(Entity, u32)],
    /// Living cores with their factions.
    pub cores: &'a [(Entity, u32)],
    /// Map objects in creation order.
    pub objects: &'a [Entity],
}

/// Every ship in the rosters of `cores`, in roster order.
pub fn fleet(world: &World, cores: &[(Entity, u32)]) -> Vec<(Entity, u32)> {
    cores
        .iter()
        .flat_map(|&(core, faction)| {
            shipyard::roster(world, core)
                .into_iter()
                .filter_map(entity_of)
                .map(move |ship| (ship, faction))
        })
        .collect()
}

/// Run one tick for one ship. Shots fired are appended to `fired`.
pub fn update(
    world: &mut World,
    ship: Entity,
    pass: &ShipPass,
    rng: &mut ChaCha8Rng,
    feedback: &mut Feedback,
    fired: &mut Vec<Shot>,
) {
    if !is_alive(world, ship) {
        return;
    }

    if let Ok(mut mods) = world.get::<&mut Modifiers>(ship) {
        modifiers::tick_all(&mut mods);
    }
    think(world, ship, pass);
    steer(world, ship, rng);
    if let Some(shot) = weapons::try_fire(world, ship) {
        fired.push(shot);
    }
    contain(world, ship);
    pick_up(world, ship, pass.objects, feedback);
    retreat_heal(world, ship, feedback);
    tick_timers(world, ship);
}

/// Gather the ship's situation and run the state machine.
fn think(world: &mut World, ship: Entity, pass: &ShipPass) {
    let (Some(pos), Some(Faction(faction)), Some(health), Some(weapon)) = (
        copied::<Position>(world, ship),
        copied::<Faction>(world, ship),
        copied::<Health>(world, ship),
        copied::<Weapon>(world, ship),
    ) else {
        return;
    };

    let enemies = |list: &[(Entity, u32)]| -> Vec<_> {
        list.iter()
            .filter(|&&(_, f)| f != faction)
            .filter_map(|&(e, _)| living_position(world, e).map(|p| (id_of(e), p)))
            .collect()
    };
    let ctx = ShipContext {
        health: health.current,
        max_health: health.max,
        attack_range: weapon.range,
        nearest_enemy_ship: fsm::nearest(&pos, enemies(pass.ships)),
        nearest_enemy_core: fsm::nearest(&pos, enemies(pass.cores)),
    };
    let decision = fsm::evaluate(&ctx);

    if let Ok(mut pilot) = world.get::<&mut Pilot>(ship) {
        pilot.state = decision.state;
        pilot.target = decision.target;
    }
}

/// Turn toward the destination and advance along the heading.
fn steer(world: &mut World, ship: Entity, rng: &mut ChaCha8Rng) {
    let target_pos = copied::<Pilot>(world, ship)
        .and_then(|pilot| pilot.target)
        .and_then(|target| resolve(world, target));
    let speed_multiplier = world
        .get::<&Modifiers>(ship)
        .map(|mods| modifiers::speed_multiplier(&mods))
        .unwrap_or(1.0);

    let Ok((pos, helm, pilot)) = world.query_one_mut::<(&mut Position, &mut Helm, &mut Pilot)>(ship)
    else {
        return;
    };

    let dest = match fsm::destination(pilot.state, target_pos) {
        Destination::Target(p) => p,
        Destination::PatrolCenter => pilot.patrol_center,
        Destination::Waypoint => {
            let stale = steering::needs_new_waypoint(
                pos,
                &pilot.patrol_center,
                pilot.patrol_radius,
                &pilot.waypoint,
            );
            if stale {
                let angle = rng.gen_range(0.0..TAU);
                pilot.waypoint =
                    steering::waypoint_on_circle(&pilot.patrol_center, pilot.patrol_radius, angle);
            }
            pilot.waypoint
        }
    };

    helm.heading = steering::turn_towards(helm.heading, pos, &dest, helm.turn_rate * DT);
    helm.moving = pos.range_to(&dest) > ARRIVAL_DISTANCE;
    if helm.moving {
        pos.0 += from_heading(helm.heading) * helm.speed * speed_multiplier * DT;
    }
}

/// Ships cannot leave the arena.
fn contain(world: &mut World, ship: Entity) {
    if let Ok(mut pos) = world.get::<&mut Position>(ship) {
        pos.0.x = pos.0.x.clamp(SHIP_BOUNDARY_MARGIN, ARENA_WIDTH - SHIP_BOUNDARY_MARGIN);
        pos.0.y = pos.0.y.clamp(SHIP_BOUNDARY_MARGIN, ARENA_HEIGHT - SHIP_BOUNDARY_MARGIN);
    }
}

/// Consume the first active map object the ship overlaps. At most one per tick.
fn pick_up(world: &mut World, ship: Entity, objects: &[Entity], feedback: &mut Feedback) {
    let (Some(pos), Some(Faction(faction))) = (
        copied::<Position>(world, ship),
        copied::<Faction>(world, ship),
    ) else {
        return;
    };

    let found = objects.iter().copied().find(|&object| {
        let Some(object_pos) = copied::<Position>(world, object) else {
            return false;
        };
        world
            .get::<&MapObject>(object)
            .map(|o| o.active && pos.range_to(&object_pos) < o.size + PICKUP_MARGIN)
            .unwrap_or(false)
    });
    let Some(object) = found else {
        return;
    };

    let (kind, value, duration) = {
        let Ok(mut o) = world.get::<&mut MapObject>(object) else {
            return;
        };
        o.active = false;
        (o.kind, o.effect_value, o.effect_duration)
    };

    let Ok((health, mods)) = world.query_one_mut::<(&mut Health, &mut Modifiers)>(ship) else {
        return;
    };
    let effect = Modifier {
        factor: value,
        remaining_ticks: duration,
    };
    match kind {
        MapObjectKind::Resource => health.current = (health.current + value).min(health.max),
        MapObjectKind::Buff => mods.buffs.push(effect),
        MapObjectKind::Debuff => mods.debuffs.push(effect),
        MapObjectKind::Obstacle => {}
    }

    debug!(ship = id_of(ship).0, faction, ?kind, "map object picked up");
    feedback.event(SimEvent::ObjectPickedUp { kind, faction });
}

/// Regenerate while retreating, with a periodic heal sparkle.
fn retreat_heal(world: &mut World, ship: Entity, feedback: &mut Feedback) {
    let Ok((pos, health, pilot)) = world.query_one_mut::<(&Position, &mut Health, &mut Pilot)>(ship)
    else {
        return;
    };
    if pilot.state != ShipState::Retreat {
        return;
    }

    health.current = (health.current + pilot.retreat_heal_rate * DT).min(health.max);
    pilot.heal_particle_timer += 1;
    if pilot.heal_particle_timer >= HEAL_PARTICLE_INTERVAL {
        pilot.heal_particle_timer = 0;
        feedback.effect(EffectRequest::heal(*pos));
    }
}

fn tick_timers(world: &mut World, ship: Entity) {
    if let Ok((weapon, flash)) = world.query_one_mut::<(&mut Weapon, &mut DamageFlash)>(ship) {
        weapon.cooldown = weapon.cooldown.saturating_sub(1);
        flash.ticks = flash.ticks.saturating_sub(1);
    }
}
