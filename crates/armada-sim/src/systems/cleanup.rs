//! Cleanup system: removes spent projectiles, destroyed ships and destroyed cores.

use hecs::{Entity, World};

use armada_core::components::{FactionCore, Health, Projectile, Ship, Shipyard};
use armada_core::types::EntityId;

use crate::handles::id_of;

/// Despawn everything that finished this tick and prune rosters to match.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.lifetime_ticks == 0 {
            despawn_buffer.push(entity);
        }
    }

    let mut dead_ships: Vec<EntityId> = Vec::new();
    for (entity, (_ship, health)) in world.query_mut::<(&Ship, &Health)>() {
        if health.current <= 0.0 {
            despawn_buffer.push(entity);
            dead_ships.push(id_of(entity));
        }
    }
    if !dead_ships.is_empty() {
        for (_entity, yard) in world.query_mut::<&mut Shipyard>() {
            yard.roster.retain(|id| !dead_ships.contains(id));
        }
    }

    // A destroyed core's fleet was already removed when it fell.
    for (entity, (_core, health)) in world.query_mut::<(&FactionCore, &Health)>() {
        if health.current <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
