//! Conversions between hecs entities and the stable `EntityId` handles stored
//! in components.
//!
//! A handle carries the entity's generation, so a handle to a despawned entity
//! never resolves to whatever reuses its slot.

use hecs::{Component, Entity, World};

use armada_core::components::Health;
use armada_core::enums::Target;
use armada_core::types::{EntityId, Position};

pub fn id_of(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

pub fn entity_of(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id.0)
}

pub fn target_entity(target: Target) -> Option<Entity> {
    match target {
        Target::Ship(id) | Target::Core(id) => entity_of(id),
    }
}

/// Copy a component out of the world, releasing the borrow immediately.
pub fn copied<T: Component + Copy>(world: &World, entity: Entity) -> Option<T> {
    world.get::<&T>(entity).ok().map(|c| *c)
}

/// Whether the entity exists and still has health left.
pub fn is_alive(world: &World, entity: Entity) -> bool {
    world
        .get::<&Health>(entity)
        .map(|h| h.current > 0.0)
        .unwrap_or(false)
}

/// Position of a living entity. Despawned or destroyed entities resolve to
/// `None`: the target is lost.
pub fn living_position(world: &World, entity: Entity) -> Option<Position> {
    if is_alive(world, entity) {
        copied::<Position>(world, entity)
    } else {
        None
    }
}

/// Live position of a target, if it is still a valid target.
pub fn resolve(world: &World, target: Target) -> Option<Position> {
    target_entity(target).and_then(|e| living_position(world, e))
}
