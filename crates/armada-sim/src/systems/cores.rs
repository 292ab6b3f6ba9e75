//! Faction core physics, boundary handling and on-board systems.

use hecs::{Entity, World};

use armada_core::components::{CoreBody, DamageFlash, Faction, FactionCore, Health, Shield, Shipyard};
use armada_core::config::GameConfig;
use armada_core::constants::*;
use armada_core::types::{normalized, Position, Velocity};
use glam::DVec2;

use crate::handles::{copied, living_position};

/// Living cores in faction order.
pub fn living(world: &World) -> Vec<(Entity, u32)> {
    let mut cores: Vec<(Entity, u32)> = world
        .query::<(&FactionCore, &Faction, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| health.current > 0.0)
        .map(|(entity, (_, faction, _))| (entity, faction.0))
        .collect();
    cores.sort_by_key(|&(_, faction)| faction);
    cores
}

/// Run physics, boundaries and on-board systems for one core.
pub fn update(
    world: &mut World,
    core: Entity,
    cores: &[(Entity, u32)],
    obstacles: &[(Position, f64)],
    config: &GameConfig,
) {
    let force = net_force(world, core, cores, obstacles, config);

    let Ok((pos, vel, body, health, shield, yard, flash)) = world.query_one_mut::<(
        &mut Position,
        &mut Velocity,
        &CoreBody,
        &Health,
        &mut Shield,
        &mut Shipyard,
        &mut DamageFlash,
    )>(core) else {
        return;
    };
    if health.current <= 0.0 {
        return;
    }

    integrate(pos, vel, force, body.mass, config.friction);
    contain(pos, vel, body.radius, config.boundary_bounce);

    if shield.energy < shield.max {
        shield.energy = (shield.energy + shield.recharge_rate * DT).min(shield.max);
    }
    yard.resources = (yard.resources + CORE_RESOURCE_PER_TICK).min(yard.resource_cap);
    flash.ticks = flash.ticks.saturating_sub(1);
}

/// Attraction toward every other living core plus repulsion from nearby
/// obstacles. Reads other cores' live positions, so cores already moved this
/// tick pull from where they are now.
fn net_force(
    world: &World,
    core: Entity,
    cores: &[(Entity, u32)],
    obstacles: &[(Position, f64)],
    config: &GameConfig,
) -> DVec2 {
    let (Some(pos), Some(body)) = (
        copied::<Position>(world, core),
        copied::<CoreBody>(world, core),
    ) else {
        return DVec2::ZERO;
    };

    let mut force = DVec2::ZERO;
    for &(other, _) in cores {
        if other == core {
            continue;
        }
        let (Some(other_pos), Some(other_body)) = (
            living_position(world, other),
            copied::<CoreBody>(world, other),
        ) else {
            continue;
        };
        let offset = pos.offset_to(&other_pos);
        let distance = offset.length().max(MIN_FORCE_DISTANCE);
        let magnitude = config.gravity_strength * body.mass * other_body.mass / (distance * distance);
        force += normalized(offset) * magnitude;
    }

    for (obstacle_pos, size) in obstacles {
        let offset = obstacle_pos.offset_to(&pos);
        let distance = offset.length().max(MIN_FORCE_DISTANCE);
        if distance < body.radius + size + OBSTACLE_REPULSION_MARGIN {
            force += normalized(offset) * (OBSTACLE_REPULSION / (distance * distance));
        }
    }
    force
}

/// Semi-implicit Euler step with friction and a speed cap.
pub fn integrate(pos: &mut Position, vel: &mut Velocity, force: DVec2, mass: f64, friction: f64) {
    vel.0 = (vel.0 + force / mass * DT) * friction;
    if vel.speed() > CORE_MAX_SPEED {
        vel.0 = normalized(vel.0) * CORE_MAX_SPEED;
    }
    pos.0 += vel.0 * DT;
}

/// Clamp the core inside the arena, bouncing the offending velocity component.
pub fn contain(pos: &mut Position, vel: &mut Velocity, radius: f64, bounce: f64) {
    if pos.0.x - radius < 0.0 {
        pos.0.x = radius;
        vel.0.x *= -bounce;
    } else if pos.0.x + radius > ARENA_WIDTH {
        pos.0.x = ARENA_WIDTH - radius;
        vel.0.x *= -bounce;
    }

    if pos.0.y - radius < 0.0 {
        pos.0.y = radius;
        vel.0.y *= -bounce;
    } else if pos.0.y + radius > ARENA_HEIGHT {
        pos.0.y = ARENA_HEIGHT - radius;
        vel.0.y *= -bounce;
    }
}
