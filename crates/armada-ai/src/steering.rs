//! Heading and aiming geometry.

use armada_core::constants::{MIN_TURN_DISTANCE, WAYPOINT_REACHED_DISTANCE};
use armada_core::types::{wrap_angle, Position};

/// Turn `heading` toward `to`, by at most `max_turn` radians.
///
/// Takes the shortest way round. The heading is left untouched when the
/// destination is too close to define a direction.
pub fn turn_towards(heading: f64, from: &Position, to: &Position, max_turn: f64) -> f64 {
    if from.range_to(to) <= MIN_TURN_DISTANCE {
        return heading;
    }
    let diff = wrap_angle(from.bearing_to(to) - heading);
    let turn = diff.clamp(-max_turn, max_turn);
    wrap_angle(heading + turn)
}

/// Signed angle from `heading` to the bearing of `to`, in [-π, π).
pub fn angle_off_bow(heading: f64, from: &Position, to: &Position) -> f64 {
    wrap_angle(from.bearing_to(to) - heading)
}

/// Whether `to` lies within half of `cone_angle` either side of `heading`.
/// A target sitting exactly on the shooter has no bearing and is never in
/// the cone.
pub fn in_firing_cone(heading: f64, from: &Position, to: &Position, cone_angle: f64) -> bool {
    if from.offset_to(to).length() <= 0.0 {
        return false;
    }
    angle_off_bow(heading, from, to).abs() <= cone_angle / 2.0
}

/// A patrol waypoint is stale once the ship has drifted off its patrol
/// circle or has arrived near the waypoint.
pub fn needs_new_waypoint(
    position: &Position,
    patrol_center: &Position,
    patrol_radius: f64,
    waypoint: &Position,
) -> bool {
    position.range_to(patrol_center) > patrol_radius
        || position.range_to(waypoint) < WAYPOINT_REACHED_DISTANCE
}

/// Point on the patrol circle at `angle`.
pub fn waypoint_on_circle(patrol_center: &Position, patrol_radius: f64, angle: f64) -> Position {
    patrol_center.project(angle, patrol_radius)
}
