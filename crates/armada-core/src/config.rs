//! Tuning parameters fixed at simulation start.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected configuration. Raised at initialization, never mid-simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("faction count must be at least 1")]
    NoFactions,

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be at least 1 tick")]
    ZeroTicks { field: &'static str },

    #[error("{field} range is invalid: ({min}, {max})")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfBounds {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Every numeric knob of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub num_factions: u32,
    pub map_objects_count: u32,

    // --- Cores ---
    pub core_radius: f64,
    pub core_mass: f64,
    /// Each velocity component starts uniformly in `[-range.0, range.1]`.
    pub core_initial_velocity_range: (f64, f64),
    pub core_spawn_interval: u32,
    pub core_max_ships: usize,
    pub core_health: f64,

    // --- Ships ---
    pub ship_length: f64,
    pub ship_width: f64,
    pub ship_speed: f64,
    pub ship_mass: f64,
    pub ship_health: f64,
    pub ship_attack_damage: f64,
    pub ship_attack_range: f64,
    /// Full firing cone width in degrees.
    pub ship_attack_angle_deg: f64,
    pub ship_attack_cooldown: u32,
    /// Radians per second.
    pub ship_turn_rate: f64,
    /// Health per second while retreating.
    pub ship_retreat_heal_rate: f64,

    // --- Physics ---
    pub gravity_strength: f64,
    pub friction: f64,
    pub boundary_bounce: f64,

    // --- Map objects ---
    pub obstacle_size_range: (f64, f64),
    pub resource_size_range: (f64, f64),
    pub buff_size_range: (f64, f64),
    pub debuff_size_range: (f64, f64),
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_factions: 6,
            map_objects_count: 50,
            core_radius: 30.0,
            core_mass: 100.0,
            core_initial_velocity_range: (20.0, 50.0),
            core_spawn_interval: 120,
            core_max_ships: 35,
            core_health: 1500.0,
            ship_length: 24.0,
            ship_width: 16.0,
            ship_speed: 95.0,
            ship_mass: 1.0,
            ship_health: 120.0,
            ship_attack_damage: 25.0,
            ship_attack_range: 280.0,
            ship_attack_angle_deg: 40.0,
            ship_attack_cooldown: 50,
            ship_turn_rate: 3.8,
            ship_retreat_heal_rate: 12.0,
            gravity_strength: 120.0,
            friction: 0.98,
            boundary_bounce: 0.85,
            obstacle_size_range: (35.0, 90.0),
            resource_size_range: (18.0, 35.0),
            buff_size_range: (12.0, 18.0),
            debuff_size_range: (12.0, 18.0),
        }
    }
}

impl GameConfig {
    /// Check every parameter. The first violation found is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_factions == 0 {
            return Err(ConfigError::NoFactions);
        }

        for (field, value) in [
            ("core_radius", self.core_radius),
            ("core_mass", self.core_mass),
            ("core_health", self.core_health),
            ("ship_length", self.ship_length),
            ("ship_width", self.ship_width),
            ("ship_speed", self.ship_speed),
            ("ship_mass", self.ship_mass),
            ("ship_health", self.ship_health),
            ("ship_attack_range", self.ship_attack_range),
            ("ship_turn_rate", self.ship_turn_rate),
        ] {
            positive(field, value)?;
        }

        for (field, value) in [
            ("ship_attack_damage", self.ship_attack_damage),
            ("ship_retreat_heal_rate", self.ship_retreat_heal_rate),
            ("gravity_strength", self.gravity_strength),
        ] {
            non_negative(field, value)?;
        }

        for (field, value) in [
            ("core_spawn_interval", self.core_spawn_interval),
            ("ship_attack_cooldown", self.ship_attack_cooldown),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroTicks { field });
            }
        }

        bounded("ship_attack_angle_deg", self.ship_attack_angle_deg, 0.0, 360.0)?;
        if self.ship_attack_angle_deg == 0.0 {
            return Err(ConfigError::NotPositive {
                field: "ship_attack_angle_deg",
                value: 0.0,
            });
        }
        bounded("friction", self.friction, 0.0, 1.0)?;
        if self.friction == 0.0 {
            return Err(ConfigError::NotPositive {
                field: "friction",
                value: 0.0,
            });
        }
        bounded("boundary_bounce", self.boundary_bounce, 0.0, 1.0)?;

        let (lo, hi) = self.core_initial_velocity_range;
        non_negative("core_initial_velocity_range", lo)?;
        non_negative("core_initial_velocity_range", hi)?;

        for (field, range) in [
            ("obstacle_size_range", self.obstacle_size_range),
            ("resource_size_range", self.resource_size_range),
            ("buff_size_range", self.buff_size_range),
            ("debuff_size_range", self.debuff_size_range),
        ] {
            size_range(field, range)?;
        }

        Ok(())
    }

    /// Full firing cone width in radians.
    pub fn ship_attack_angle_rad(&self) -> f64 {
        self.ship_attack_angle_deg.to_radians()
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfBounds {
            field,
            value,
            min: 0.0,
            max: f64::INFINITY,
        })
    }
}

fn bounded(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfBounds {
            field,
            value,
            min,
            max,
        })
    }
}

fn size_range(field: &'static str, (min, max): (f64, f64)) -> Result<(), ConfigError> {
    finite(field, min)?;
    finite(field, max)?;
    if min > 0.0 && min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { field, min, max })
    }
}
