//! Simulation constants and fixed rules.
//!
//! Tuning knobs that vary per run live in [`crate::config::GameConfig`].

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Arena ---

/// Arena width in world units.
pub const ARENA_WIDTH: f64 = 1800.0;

/// Arena height in world units.
pub const ARENA_HEIGHT: f64 = 1000.0;

/// Distances are floored at this value before any inverse-square division.
pub const MIN_FORCE_DISTANCE: f64 = 1.0;

// --- Core physics ---

/// Core speed cap (units/s).
pub const CORE_MAX_SPEED: f64 = 120.0;

/// Numerator of the obstacle repulsion force (divided by distance squared).
pub const OBSTACLE_REPULSION: f64 = 6000.0;

/// Obstacles repel a core within `core radius + obstacle size + this margin`.
pub const OBSTACLE_REPULSION_MARGIN: f64 = 60.0;

// --- Core systems ---

/// Fraction of incoming damage the shield can soak (bounded by remaining shield).
pub const SHIELD_ABSORB_FRACTION: f64 = 0.6;

/// Core shield capacity.
pub const CORE_MAX_SHIELD: f64 = 100.0;

/// Shield regeneration per second.
pub const CORE_SHIELD_RECHARGE_PER_SEC: f64 = 5.0;

/// Resources a core starts with.
pub const CORE_STARTING_RESOURCES: f64 = 100.0;

/// Resource stockpile ceiling.
pub const CORE_RESOURCE_CAP: f64 = 250.0;

/// Resources accrued per tick.
pub const CORE_RESOURCE_PER_TICK: f64 = 0.15;

/// Resource cost of one ship.
pub const SHIP_PRODUCTION_COST: f64 = 25.0;

/// Ships spawn on a ring this far outside the core radius.
pub const SPAWN_RING_OFFSET: f64 = 40.0;

/// Damage-flash duration after a core is hit (ticks).
pub const CORE_FLASH_TICKS: u32 = 8;

// --- Ship behaviour ---

/// Ships retreat below this fraction of max health.
pub const RETREAT_HEALTH_FRACTION: f64 = 0.25;

/// Enemy ships within `attack_range * ENGAGE_RANGE_FACTOR` are engaged.
pub const ENGAGE_RANGE_FACTOR: f64 = 1.3;

/// Radius of the circle patrol waypoints are drawn on.
pub const PATROL_RADIUS: f64 = 180.0;

/// A patrol waypoint closer than this is considered reached.
pub const WAYPOINT_REACHED_DISTANCE: f64 = 60.0;

/// Ships within this distance of their destination hold position.
pub const ARRIVAL_DISTANCE: f64 = 15.0;

/// Ships only turn when the destination is farther than this.
pub const MIN_TURN_DISTANCE: f64 = 1.0;

/// Ships are kept this far inside the arena edges.
pub const SHIP_BOUNDARY_MARGIN: f64 = 20.0;

/// Ships pick up an object within `object size + PICKUP_MARGIN`.
pub const PICKUP_MARGIN: f64 = 15.0;

/// Damage-flash duration after a ship is hit (ticks).
pub const SHIP_FLASH_TICKS: u32 = 6;

/// A heal particle request is emitted every this many retreating ticks.
pub const HEAL_PARTICLE_INTERVAL: u32 = 8;

// --- Projectiles ---

/// Projectile speed (units/s).
pub const PROJECTILE_SPEED: f64 = 600.0;

/// Projectile lifetime in ticks (2.8 s).
pub const PROJECTILE_LIFETIME_TICKS: u32 = 168;

/// A projectile hits when closer than this to its target.
pub const PROJECTILE_HIT_RADIUS: f64 = 22.0;

/// Projectiles with fewer ticks left than this pulse the impact feedback.
pub const PROJECTILE_NEAR_EXPIRY_TICKS: u32 = 5;

// --- Impact feedback ---

/// Feedback pulse when a core is destroyed.
pub const CORE_DESTROYED_FEEDBACK: u32 = 15;

/// Feedback pulse while a projectile is about to expire.
pub const PROJECTILE_EXPIRY_FEEDBACK: u32 = 3;

// --- Map objects ---

/// Health restored by a resource pickup.
pub const RESOURCE_HEAL: f64 = 60.0;

/// Speed and damage multiplier of a buff pickup.
pub const BUFF_FACTOR: f64 = 1.6;

/// Buff duration (ticks).
pub const BUFF_DURATION_TICKS: u32 = 360;

/// Speed multiplier of a debuff pickup.
pub const DEBUFF_FACTOR: f64 = 0.4;

/// Debuff duration (ticks).
pub const DEBUFF_DURATION_TICKS: u32 = 240;

/// Per-tick chance that one inactive object is reactivated.
pub const OBJECT_RESPAWN_CHANCE: f64 = 0.002;

/// Cosmetic pulse phase advance per tick for active objects.
pub const OBJECT_PULSE_STEP: f64 = 0.02;

/// Relative weights of obstacle, resource, buff, debuff at world setup.
pub const OBJECT_KIND_WEIGHTS: [f64; 4] = [0.65, 0.18, 0.10, 0.07];

/// Obstacle outline vertex count range (inclusive).
pub const OBSTACLE_VERTICES: (u32, u32) = (8, 14);

/// Obstacle outline radius jitter, as a fraction of its size.
pub const OBSTACLE_JITTER: (f64, f64) = (0.7, 1.3);

// --- World setup ---

/// Cores are placed at least this far from the arena edges.
pub const CORE_PLACEMENT_MARGIN: f64 = 250.0;

/// Minimum distance between two cores at setup.
pub const CORE_MIN_SEPARATION: f64 = 350.0;

/// Placement attempts per core before giving up.
pub const CORE_PLACEMENT_ATTEMPTS: u32 = 100;

/// Map objects are placed at least this far from the arena edges.
pub const OBJECT_PLACEMENT_MARGIN: f64 = 120.0;

/// Minimum distance from a map object to any core at setup.
pub const OBJECT_CORE_CLEARANCE: f64 = 180.0;

/// Minimum distance between two map objects at setup.
pub const OBJECT_MIN_SEPARATION: f64 = 120.0;

/// Placement attempts per map object before giving up.
pub const OBJECT_PLACEMENT_ATTEMPTS: u32 = 50;
