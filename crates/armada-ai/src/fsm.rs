//! Ship behaviour finite state machine.
//!
//! Pure functions that pick a ship's state and target from its situation.
//! No ECS dependency; operates on plain data gathered by the caller.

use armada_core::constants::{ENGAGE_RANGE_FACTOR, RETREAT_HEALTH_FRACTION};
use armada_core::enums::{ShipState, Target};
use armada_core::types::{EntityId, Position};

/// Input to the FSM for a single ship.
///
/// Candidate lists are pre-filtered by the caller to living enemies.
pub struct ShipContext {
    pub health: f64,
    pub max_health: f64,
    pub attack_range: f64,
    /// Closest living enemy ship and its distance.
    pub nearest_enemy_ship: Option<(EntityId, f64)>,
    /// Closest living enemy core and its distance.
    pub nearest_enemy_core: Option<(EntityId, f64)>,
}

/// Output from the FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiDecision {
    pub state: ShipState,
    pub target: Option<Target>,
}

/// Evaluate the transition rules, highest priority first:
///
/// 1. below 25 % health: retreat with no target, regardless of enemies;
/// 2. an enemy ship within `attack_range * 1.3`: attack it;
/// 3. any enemy core: assault the nearest one;
/// 4. otherwise patrol.
///
/// Every rule assigns a fresh target, so a target that died since the last
/// evaluation never survives it.
pub fn evaluate(ctx: &ShipContext) -> AiDecision {
    if ctx.health < ctx.max_health * RETREAT_HEALTH_FRACTION {
        return AiDecision {
            state: ShipState::Retreat,
            target: None,
        };
    }

    if let Some((ship, distance)) = ctx.nearest_enemy_ship {
        if distance <= ctx.attack_range * ENGAGE_RANGE_FACTOR {
            return AiDecision {
                state: ShipState::AttackShip,
                target: Some(Target::Ship(ship)),
            };
        }
    }

    if let Some((core, _)) = ctx.nearest_enemy_core {
        return AiDecision {
            state: ShipState::AssaultCore,
            target: Some(Target::Core(core)),
        };
    }

    AiDecision {
        state: ShipState::Patrol,
        target: None,
    }
}

/// Closest candidate to `origin`. Ties go to the first candidate at the
/// minimum distance.
pub fn nearest<I>(origin: &Position, candidates: I) -> Option<(EntityId, f64)>
where
    I: IntoIterator<Item = (EntityId, Position)>,
{
    let mut best: Option<(EntityId, f64)> = None;
    for (id, pos) in candidates {
        let distance = origin.range_to(&pos);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((id, distance)),
        }
    }
    best
}

/// Where a ship wants to go this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Destination {
    /// Live position of the current target.
    Target(Position),
    /// Home: the patrol center.
    PatrolCenter,
    /// The current patrol waypoint, refreshed by the caller when stale.
    Waypoint,
}

/// Engaging states head for the live target position; retreat heads home;
/// patrol (or an engaging state whose target could not be resolved) heads
/// for the patrol waypoint.
pub fn destination(state: ShipState, target_position: Option<Position>) -> Destination {
    match (state, target_position) {
        (ShipState::AttackShip | ShipState::AssaultCore, Some(pos)) => Destination::Target(pos),
        (ShipState::Retreat, _) => Destination::PatrolCenter,
        _ => Destination::Waypoint,
    }
}
