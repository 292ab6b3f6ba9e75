//! Damage application for both kinds of target.
//!
//! Cores and ships share `Position` + `Health`; dispatch on `Target` covers the
//! rest (shield, roster teardown, kill credit).

use hecs::{Entity, World};
use tracing::{debug, info};

use armada_core::components::*;
use armada_core::constants::*;
use armada_core::enums::Target;
use armada_core::events::{EffectRequest, SimEvent};
use armada_core::types::{EntityId, Position};

use crate::feedback::Feedback;
use crate::handles::{entity_of, id_of};

/// Who fired the damaging shot.
#[derive(Debug, Clone, Copy)]
pub struct Attacker {
    pub ship: EntityId,
    pub faction: u32,
}

/// Apply `amount` to whatever `target` refers to. A vanished target is a no-op.
pub fn apply(
    world: &mut World,
    target: Target,
    amount: f64,
    attacker: Option<Attacker>,
    feedback: &mut Feedback,
) {
    match target {
        Target::Core(id) => {
            if let Some(core) = entity_of(id) {
                damage_core(world, core, amount, feedback);
            }
        }
        Target::Ship(id) => {
            if let Some(ship) = entity_of(id) {
                damage_ship(world, ship, amount, attacker, feedback);
            }
        }
    }
}

/// Split incoming damage into `(absorbed by shield, passed to hull)`.
///
/// The shield soaks up to 60 % of the hit, bounded by its remaining energy.
pub fn absorb(shield: f64, amount: f64) -> (f64, f64) {
    if shield <= 0.0 {
        return (0.0, amount);
    }
    let absorbed = shield.min(amount * SHIELD_ABSORB_FRACTION);
    (absorbed, amount - absorbed)
}

/// Damage a core. Destroying it clears and despawns its whole fleet at once.
pub fn damage_core(world: &mut World, core: Entity, amount: f64, feedback: &mut Feedback) {
    let Ok((pos, faction, health, shield, flash, stats, yard)) = world.query_one_mut::<(
        &Position,
        &Faction,
        &mut Health,
        &mut Shield,
        &mut DamageFlash,
        &mut CoreStats,
        &mut Shipyard,
    )>(core) else {
        return;
    };
    if health.current <= 0.0 {
        return;
    }

    let (absorbed, through) = absorb(shield.energy, amount);
    shield.energy = (shield.energy - absorbed).max(0.0);
    health.current -= through;
    stats.damage_taken += through;
    flash.ticks = CORE_FLASH_TICKS;

    if health.current > 0.0 {
        return;
    }
    health.current = 0.0;
    let fleet = std::mem::take(&mut yard.roster);
    let (pos, faction) = (*pos, faction.0);

    for ship in fleet.iter().filter_map(|id| entity_of(*id)) {
        let _ = world.despawn(ship);
    }

    info!(faction, fleet = fleet.len(), "core destroyed");
    feedback.effect(EffectRequest::core_destroyed(pos, faction));
    feedback.pulse(CORE_DESTROYED_FEEDBACK);
    feedback.event(SimEvent::CoreDestroyed { faction });
}

/// Damage a ship. The transition to zero health happens once and credits the
/// kill to the victim's owning core, alongside its loss count, and the kill to
/// the shooting ship.
pub fn damage_ship(
    world: &mut World,
    ship: Entity,
    amount: f64,
    attacker: Option<Attacker>,
    feedback: &mut Feedback,
) {
    let Ok((pos, faction, owner, health, flash)) = world
        .query_one_mut::<(&Position, &Faction, &OwnedBy, &mut Health, &mut DamageFlash)>(ship)
    else {
        return;
    };

    let was_alive = health.current > 0.0;
    health.current = (health.current - amount).max(0.0);
    flash.ticks = SHIP_FLASH_TICKS;
    if !was_alive || health.current > 0.0 {
        return;
    }
    let (pos, faction, owner) = (*pos, faction.0, owner.0);

    if let Some(core) = entity_of(owner) {
        if let Ok(mut stats) = world.get::<&mut CoreStats>(core) {
            stats.kills += 1;
            stats.ships_lost += 1;
        }
    }
    if let Some(shooter) = attacker.and_then(|a| entity_of(a.ship)) {
        if let Ok(mut stats) = world.get::<&mut ShipStats>(shooter) {
            stats.kills += 1;
        }
    }

    debug!(
        ship = id_of(ship).0,
        faction,
        killer_faction = ?attacker.map(|a| a.faction),
        "ship destroyed"
    );
    feedback.effect(EffectRequest::ship_destroyed(pos, faction));
    feedback.event(SimEvent::ShipDestroyed {
        ship: id_of(ship),
        faction,
        killer_faction: attacker.map(|a| a.faction),
    });
}
