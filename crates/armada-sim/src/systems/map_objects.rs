//! Map object animation, respawn, and read-only views used by other systems.
//!
//! Map objects are never despawned, so their storage order is their
//! creation order.

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use armada_core::components::MapObject;
use armada_core::constants::{OBJECT_PULSE_STEP, OBJECT_RESPAWN_CHANCE};
use armada_core::enums::MapObjectKind;
use armada_core::events::SimEvent;
use armada_core::types::Position;

use crate::feedback::Feedback;

/// Advance the cosmetic pulse of every active object.
pub fn animate(world: &mut World) {
    for (_entity, object) in world.query_mut::<&mut MapObject>() {
        if object.active {
            object.pulse_phase += OBJECT_PULSE_STEP;
        }
    }
}

/// With a small chance per tick, reactivate one inactive object chosen at random.
pub fn respawn(world: &mut World, rng: &mut ChaCha8Rng, feedback: &mut Feedback) {
    let inactive: Vec<Entity> = world
        .query::<&MapObject>()
        .iter()
        .filter(|(_, object)| !object.active)
        .map(|(entity, _)| entity)
        .collect();

    if inactive.is_empty() || rng.gen::<f64>() >= OBJECT_RESPAWN_CHANCE {
        return;
    }
    let Some(&entity) = inactive.choose(rng) else {
        return;
    };

    if let Ok((pos, object)) = world.query_one_mut::<(&Position, &mut MapObject)>(entity) {
        object.active = true;
        debug!(kind = ?object.kind, x = pos.x(), y = pos.y(), "map object respawned");
        feedback.event(SimEvent::ObjectRespawned {
            kind: object.kind,
            position: *pos,
        });
    }
}

/// Every map object, in creation order.
pub fn ordered(world: &World) -> Vec<Entity> {
    world
        .query::<&MapObject>()
        .iter()
        .map(|(entity, _)| entity)
        .collect()
}

/// Position and size of every obstacle. Inactive obstacles are included: a
/// picked-up obstacle still pushes cores away.
pub fn obstacles(world: &World) -> Vec<(Position, f64)> {
    world
        .query::<(&Position, &MapObject)>()
        .iter()
        .filter(|(_, (_, object))| object.kind == MapObjectKind::Obstacle)
        .map(|(_, (pos, object))| (*pos, object.size))
        .collect()
}
