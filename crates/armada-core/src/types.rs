//! Fundamental geometric and simulation types.
//!
//! Vectors are `glam::DVec2`. `Position` and `Velocity` wrap it so they can be
//! stored as distinct ECS components.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in arena space (x right, y down, origin at the top-left corner).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec2);

/// 2D velocity in arena units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec2);

/// Handle to another entity, stored as the raw bits of its ECS id.
///
/// Holding a handle never keeps the referent alive. Resolving one after the
/// entity has been despawned yields nothing, which callers treat as "lost".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    /// Straight-line distance to another position.
    pub fn range_to(&self, other: &Position) -> f64 {
        self.0.distance(other.0)
    }

    /// Offset vector from this position to `other`.
    pub fn offset_to(&self, other: &Position) -> DVec2 {
        other.0 - self.0
    }

    /// Unit vector toward `other`, or zero when both positions coincide.
    pub fn direction_to(&self, other: &Position) -> DVec2 {
        normalized(self.offset_to(other))
    }

    /// Bearing to another position in radians, measured from +x toward +y.
    pub fn bearing_to(&self, other: &Position) -> f64 {
        heading_of(self.offset_to(other))
    }

    /// Point at `distance` from this position along `angle`.
    pub fn project(&self, angle: f64, distance: f64) -> Position {
        Position(self.0 + from_heading(angle) * distance)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    /// Speed magnitude (units/s).
    pub fn speed(&self) -> f64 {
        self.0.length()
    }
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Unit vector in the direction of `v`. A zero vector stays zero instead of
/// producing NaNs, so stationary entities never fault.
pub fn normalized(v: DVec2) -> DVec2 {
    v.normalize_or_zero()
}

/// Unit vector pointing along `angle` (radians).
pub fn from_heading(angle: f64) -> DVec2 {
    DVec2::new(angle.cos(), angle.sin())
}

/// Angle of `v` in radians, in (-π, π].
pub fn heading_of(v: DVec2) -> f64 {
    v.y.atan2(v.x)
}

/// Wrap an angle into [-π, π).
pub fn wrap_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}
