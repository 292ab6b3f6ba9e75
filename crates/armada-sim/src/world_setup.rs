//! Entity spawn factories for setting up the simulation world.
//!
//! Places faction cores and map objects by bounded rejection sampling,
//! and builds the component bundles for ships and projectiles.

use std::f64::consts::TAU;

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{info, warn};

use armada_core::components::*;
use armada_core::config::GameConfig;
use armada_core::constants::*;
use armada_core::enums::*;
use armada_core::types::{normalized, EntityId, Position, Velocity};

use crate::handles::id_of;

/// How many entities world setup managed to place.
///
/// Placement gives up after a bounded number of attempts, so a crowded
/// configuration yields fewer entities than requested instead of failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlacementReport {
    pub cores_requested: u32,
    pub cores_placed: u32,
    pub objects_requested: u32,
    pub objects_placed: u32,
}

impl PlacementReport {
    pub fn is_complete(&self) -> bool {
        self.cores_placed == self.cores_requested && self.objects_placed == self.objects_requested
    }
}

/// A shot handed from the weapons system to the driver.
#[derive(Debug, Clone, Copy)]
pub struct Shot {
    pub origin: Position,
    pub target: Target,
    /// Target position at the moment of firing; fixes the flight direction.
    pub aim_point: Position,
    pub damage: f64,
    pub shooter: EntityId,
    pub faction: u32,
}

/// Build the initial world: cores first, then map objects around them.
pub fn setup_world(world: &mut World, rng: &mut ChaCha8Rng, config: &GameConfig) -> PlacementReport {
    let core_positions = place_cores(world, rng, config);
    let objects_placed = place_map_objects(world, rng, config, &core_positions);

    let report = PlacementReport {
        cores_requested: config.num_factions,
        cores_placed: core_positions.len() as u32,
        objects_requested: config.map_objects_count,
        objects_placed,
    };

    if report.is_complete() {
        info!(
            cores = report.cores_placed,
            objects = report.objects_placed,
            "world initialized"
        );
    } else {
        warn!(
            cores_requested = report.cores_requested,
            cores_placed = report.cores_placed,
            objects_requested = report.objects_requested,
            objects_placed = report.objects_placed,
            "placement fell short"
        );
    }
    report
}

/// One core per faction at integer coordinates, pairwise further apart than
/// `CORE_MIN_SEPARATION`. A faction whose attempts run out gets no core.
fn place_cores(world: &mut World, rng: &mut ChaCha8Rng, config: &GameConfig) -> Vec<Position> {
    let mut placed: Vec<Position> = Vec::new();
    for faction in 0..config.num_factions {
        for _ in 0..CORE_PLACEMENT_ATTEMPTS {
            let pos = random_grid_point(rng, CORE_PLACEMENT_MARGIN);
            if placed
                .iter()
                .all(|other| pos.range_to(other) > CORE_MIN_SEPARATION)
            {
                spawn_core(world, rng, config, faction, pos);
                placed.push(pos);
                break;
            }
        }
    }
    placed
}

fn place_map_objects(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    cores: &[Position],
) -> u32 {
    let mut placed: Vec<Position> = Vec::new();
    for _ in 0..config.map_objects_count {
        let kind = roll_object_kind(rng);
        for _ in 0..OBJECT_PLACEMENT_ATTEMPTS {
            let pos = random_grid_point(rng, OBJECT_PLACEMENT_MARGIN);
            let clear_of_cores = cores
                .iter()
                .all(|c| pos.range_to(c) > OBJECT_CORE_CLEARANCE);
            let clear_of_objects = placed
                .iter()
                .all(|o| pos.range_to(o) > OBJECT_MIN_SEPARATION);
            if clear_of_cores && clear_of_objects {
                let (lo, hi) = object_size_range(config, kind);
                let size = rng.gen_range(lo..=hi);
                spawn_map_object(world, rng, kind, pos, size);
                placed.push(pos);
                break;
            }
        }
    }
    placed.len() as u32
}

/// Integer coordinates at least `margin` inside every arena edge.
fn random_grid_point(rng: &mut ChaCha8Rng, margin: f64) -> Position {
    let x = rng.gen_range(margin as i64..=(ARENA_WIDTH - margin) as i64);
    let y = rng.gen_range(margin as i64..=(ARENA_HEIGHT - margin) as i64);
    Position::new(x as f64, y as f64)
}

fn roll_object_kind(rng: &mut ChaCha8Rng) -> MapObjectKind {
    const KINDS: [MapObjectKind; 4] = [
        MapObjectKind::Obstacle,
        MapObjectKind::Resource,
        MapObjectKind::Buff,
        MapObjectKind::Debuff,
    ];
    let weighted: Vec<(MapObjectKind, f64)> =
        KINDS.into_iter().zip(OBJECT_KIND_WEIGHTS).collect();
    weighted
        .choose_weighted(rng, |(_, w)| *w)
        .map(|(kind, _)| *kind)
        .unwrap_or(MapObjectKind::Obstacle)
}

fn object_size_range(config: &GameConfig, kind: MapObjectKind) -> (f64, f64) {
    match kind {
        MapObjectKind::Obstacle => config.obstacle_size_range,
        MapObjectKind::Resource => config.resource_size_range,
        MapObjectKind::Buff => config.buff_size_range,
        MapObjectKind::Debuff => config.debuff_size_range,
    }
}

/// Spawn a faction core at full health, shield and starting resources.
pub fn spawn_core(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    faction: u32,
    position: Position,
) -> Entity {
    let (neg, pos) = config.core_initial_velocity_range;
    let velocity = Velocity::new(rng.gen_range(-neg..=pos), rng.gen_range(-neg..=pos));

    world.spawn((
        FactionCore,
        Faction(faction),
        position,
        velocity,
        Health {
            current: config.core_health,
            max: config.core_health,
        },
        DamageFlash::default(),
        CoreBody {
            radius: config.core_radius,
            mass: config.core_mass,
        },
        Shield {
            energy: CORE_MAX_SHIELD,
            max: CORE_MAX_SHIELD,
            recharge_rate: CORE_SHIELD_RECHARGE_PER_SEC,
        },
        Shipyard {
            resources: CORE_STARTING_RESOURCES,
            resource_cap: CORE_RESOURCE_CAP,
            production_cost: SHIP_PRODUCTION_COST,
            spawn_timer: 0,
            spawn_interval: config.core_spawn_interval,
            max_ships: config.core_max_ships,
            roster: Vec::new(),
        },
        CoreStats::default(),
    ))
}

/// Spawn a ship for `owner` at `position` with a random heading. The caller
/// adds it to the owner's roster.
pub fn spawn_ship(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    owner: Entity,
    faction: u32,
    position: Position,
) -> Entity {
    let heading = rng.gen_range(0.0..TAU);

    world.spawn((
        Ship,
        Faction(faction),
        OwnedBy(id_of(owner)),
        position,
        Health {
            current: config.ship_health,
            max: config.ship_health,
        },
        DamageFlash::default(),
        Helm {
            heading,
            speed: config.ship_speed,
            turn_rate: config.ship_turn_rate,
            length: config.ship_length,
            width: config.ship_width,
            mass: config.ship_mass,
            moving: false,
        },
        Weapon {
            damage: config.ship_attack_damage,
            range: config.ship_attack_range,
            cone_angle: config.ship_attack_angle_rad(),
            cooldown_max: config.ship_attack_cooldown,
            cooldown: 0,
        },
        Pilot {
            state: ShipState::default(),
            target: None,
            patrol_center: position,
            patrol_radius: PATROL_RADIUS,
            // Starts on the ship itself, so the first patrol tick draws a real one.
            waypoint: position,
            retreat_heal_rate: config.ship_retreat_heal_rate,
            heal_particle_timer: 0,
        },
        Modifiers::default(),
        ShipStats::default(),
    ))
}

/// Spawn an active map object. Obstacles get an irregular outline.
pub fn spawn_map_object(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    kind: MapObjectKind,
    position: Position,
    size: f64,
) -> Entity {
    let pulse_phase = rng.gen_range(0.0..TAU);
    let (effect_value, effect_duration) = match kind {
        MapObjectKind::Obstacle => (0.0, 0),
        MapObjectKind::Resource => (RESOURCE_HEAL, 0),
        MapObjectKind::Buff => (BUFF_FACTOR, BUFF_DURATION_TICKS),
        MapObjectKind::Debuff => (DEBUFF_FACTOR, DEBUFF_DURATION_TICKS),
    };
    let outline = if kind == MapObjectKind::Obstacle {
        obstacle_outline(rng, position, size)
    } else {
        Vec::new()
    };

    world.spawn((
        position,
        MapObject {
            kind,
            size,
            active: true,
            effect_value,
            effect_duration,
            pulse_phase,
            outline,
        },
    ))
}

/// Evenly spaced vertices at a jittered radius around the center.
fn obstacle_outline(rng: &mut ChaCha8Rng, center: Position, size: f64) -> Vec<Position> {
    let (min_vertices, max_vertices) = OBSTACLE_VERTICES;
    let (min_jitter, max_jitter) = OBSTACLE_JITTER;
    let count = rng.gen_range(min_vertices..=max_vertices);
    (0..count)
        .map(|i| {
            let angle = i as f64 / count as f64 * TAU;
            let radius = size * rng.gen_range(min_jitter..=max_jitter);
            center.project(angle, radius)
        })
        .collect()
}

/// Spawn an unguided projectile. Its velocity is fixed here, toward where the
/// target was when the shot was fired.
pub fn spawn_projectile(world: &mut World, shot: &Shot) -> Entity {
    let direction = normalized(shot.origin.offset_to(&shot.aim_point));
    world.spawn((
        shot.origin,
        Velocity(direction * PROJECTILE_SPEED),
        Projectile {
            target: shot.target,
            damage: shot.damage,
            lifetime_ticks: PROJECTILE_LIFETIME_TICKS,
            color: EffectColor::Faction(shot.faction),
            shooter: shot.shooter,
            shooter_faction: shot.faction,
        },
    ))
}
