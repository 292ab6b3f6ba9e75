//! Ship production.

use std::f64::consts::TAU;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use armada_core::components::{CoreBody, Health, Shipyard};
use armada_core::constants::SPAWN_RING_OFFSET;
use armada_core::types::{EntityId, Position};

/// Advance the production timer of one core.
///
/// The timer only runs while the roster has room and the core can pay for a
/// ship. When it completes, the cost is debited and the point on the spawn
/// ring where the new ship should appear is returned; the driver spawns it.
pub fn run(world: &mut World, core: Entity, rng: &mut ChaCha8Rng) -> Option<Position> {
    let (pos, body, health, yard) = world
        .query_one_mut::<(&Position, &CoreBody, &Health, &mut Shipyard)>(core)
        .ok()?;
    if health.current <= 0.0 {
        return None;
    }
    if yard.roster.len() >= yard.max_ships || yard.resources < yard.production_cost {
        return None;
    }

    yard.spawn_timer += 1;
    if yard.spawn_timer < yard.spawn_interval {
        return None;
    }
    yard.spawn_timer = 0;
    yard.resources -= yard.production_cost;

    let angle = rng.gen_range(0.0..TAU);
    Some(pos.project(angle, body.radius + SPAWN_RING_OFFSET))
}

/// Register a freshly spawned ship with its core.
pub fn enlist(world: &mut World, core: Entity, ship: EntityId) {
    if let Ok(mut yard) = world.get::<&mut Shipyard>(core) {
        yard.roster.push(ship);
    }
}

/// The core's roster, in spawn order.
pub fn roster(world: &World, core: Entity) -> Vec<EntityId> {
    world
        .get::<&Shipyard>(core)
        .map(|yard| yard.roster.clone())
        .unwrap_or_default()
}
