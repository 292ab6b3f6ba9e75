//! Projectile flight and hit resolution.
//!
//! Projectiles fly straight along the velocity fixed at launch, but the hit
//! test each tick compares against the target's live position. A shot can
//! miss a target that moved away, or still land on one whose path crosses the
//! line of flight.

use hecs::{Entity, World};

use armada_core::components::Projectile;
use armada_core::constants::*;
use armada_core::events::EffectRequest;
use armada_core::types::{Position, Velocity};

use crate::feedback::Feedback;
use crate::handles::resolve;
use crate::systems::damage::{self, Attacker};

/// Advance every projectile one tick and resolve hits.
/// Spent projectiles are left at zero lifetime for cleanup.
pub fn run(world: &mut World, feedback: &mut Feedback) {
    let in_flight: Vec<Entity> = world
        .query::<&Projectile>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    for entity in in_flight {
        let Ok((pos, vel, projectile)) =
            world.query_one_mut::<(&mut Position, &Velocity, &mut Projectile)>(entity)
        else {
            continue;
        };
        if projectile.lifetime_ticks == 0 {
            continue;
        }

        pos.0 += vel.0 * DT;
        projectile.lifetime_ticks -= 1;
        if projectile.lifetime_ticks > 0 && projectile.lifetime_ticks < PROJECTILE_NEAR_EXPIRY_TICKS {
            feedback.pulse(PROJECTILE_EXPIRY_FEEDBACK);
        }
        let (here, shot) = (*pos, *projectile);

        let target_pos = resolve(world, shot.target);
        let hit = target_pos.is_some_and(|p| here.range_to(&p) < PROJECTILE_HIT_RADIUS);
        if hit {
            let attacker = Attacker {
                ship: shot.shooter,
                faction: shot.shooter_faction,
            };
            damage::apply(world, shot.target, shot.damage, Some(attacker), feedback);
            feedback.effect(EffectRequest::projectile_hit(here, shot.color));
        }

        // Target lost or hit: either way the projectile is spent.
        if hit || target_pos.is_none() {
            if let Ok(mut projectile) = world.get::<&mut Projectile>(entity) {
                projectile.lifetime_ticks = 0;
            }
        }
    }
}
