//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components.

pub mod cleanup;
pub mod cores;
pub mod damage;
pub mod map_objects;
pub mod projectiles;
pub mod ship;
pub mod shipyard;
pub mod snapshot;
pub mod weapons;
