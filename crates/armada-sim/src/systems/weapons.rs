//! Ship attack resolution.

use hecs::{Entity, World};

use armada_ai::{modifiers, steering};
use armada_core::components::*;
use armada_core::enums::ShipState;
use armada_core::types::Position;

use crate::handles::{copied, entity_of, id_of, is_alive, resolve};
use crate::world_setup::Shot;

/// Try to fire at the current target.
///
/// Requires an engaging state, a ready weapon, a live target within range and
/// inside the firing cone. On success the cooldown restarts, damage stats are
/// credited at fire time, and the shot is returned for the driver to spawn.
pub fn try_fire(world: &mut World, ship: Entity) -> Option<Shot> {
    let pilot = copied::<Pilot>(world, ship)?;
    let weapon = copied::<Weapon>(world, ship)?;
    if !matches!(pilot.state, ShipState::AttackShip | ShipState::AssaultCore) || weapon.cooldown != 0 {
        return None;
    }
    let target = pilot.target?;
    let aim_point = resolve(world, target)?;

    let pos = copied::<Position>(world, ship)?;
    let helm = copied::<Helm>(world, ship)?;
    if pos.range_to(&aim_point) > weapon.range {
        return None;
    }
    if !steering::in_firing_cone(helm.heading, &pos, &aim_point, weapon.cone_angle) {
        return None;
    }

    let multiplier = world
        .get::<&Modifiers>(ship)
        .map(|mods| modifiers::damage_multiplier(&mods))
        .unwrap_or(1.0);
    let damage = weapon.damage * multiplier;

    let (faction, owner) = {
        let (weapon, stats, faction, owner) = world
            .query_one_mut::<(&mut Weapon, &mut ShipStats, &Faction, &OwnedBy)>(ship)
            .ok()?;
        weapon.cooldown = weapon.cooldown_max;
        stats.damage_dealt += damage;
        (faction.0, owner.0)
    };

    if let Some(core) = entity_of(owner).filter(|&core| is_alive(world, core)) {
        if let Ok(mut stats) = world.get::<&mut CoreStats>(core) {
            stats.damage_dealt += damage;
        }
    }

    Some(Shot {
        origin: pos,
        target,
        aim_point,
        damage,
        shooter: id_of(ship),
        faction,
    })
}
