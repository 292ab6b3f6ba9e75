#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use armada_core::components::{Modifier, Modifiers};
    use armada_core::enums::{ShipState, Target};
    use armada_core::types::{EntityId, Position};

    use crate::fsm::{destination, evaluate, nearest, Destination, ShipContext};
    use crate::modifiers;
    use crate::steering::{in_firing_cone, needs_new_waypoint, turn_towards};

    fn make_context(
        health: f64,
        enemy_ship: Option<(u64, f64)>,
        enemy_core: Option<(u64, f64)>,
    ) -> ShipContext {
        ShipContext {
            health,
            max_health: 120.0,
            attack_range: 280.0,
            nearest_enemy_ship: enemy_ship.map(|(id, d)| (EntityId(id), d)),
            nearest_enemy_core: enemy_core.map(|(id, d)| (EntityId(id), d)),
        }
    }

    #[test]
    fn test_retreat_overrides_everything() {
        // 10 % health with an enemy ship right alongside
        let ctx = make_context(12.0, Some((1, 50.0)), Some((2, 400.0)));
        let decision = evaluate(&ctx);
        assert_eq!(decision.state, ShipState::Retreat);
        assert_eq!(decision.target, None);
    }

    #[test]
    fn test_retreat_threshold_is_strict() {
        // Exactly 25 % is still fit to fight
        let ctx = make_context(30.0, Some((1, 50.0)), None);
        assert_eq!(evaluate(&ctx).state, ShipState::AttackShip);
        let ctx = make_context(29.9, Some((1, 50.0)), None);
        assert_eq!(evaluate(&ctx).state, ShipState::Retreat);
    }

    #[test]
    fn test_engage_ship_within_extended_range() {
        // 280 * 1.3 = 364
        let ctx = make_context(120.0, Some((5, 364.0)), Some((9, 200.0)));
        let decision = evaluate(&ctx);
        assert_eq!(decision.state, ShipState::AttackShip);
        assert_eq!(decision.target, Some(Target::Ship(EntityId(5))));
    }

    #[test]
    fn test_distant_ship_falls_through_to_core() {
        let ctx = make_context(120.0, Some((5, 365.0)), Some((9, 900.0)));
        let decision = evaluate(&ctx);
        assert_eq!(decision.state, ShipState::AssaultCore);
        assert_eq!(decision.target, Some(Target::Core(EntityId(9))));
    }

    #[test]
    fn test_patrol_when_alone() {
        let ctx = make_context(120.0, None, None);
        let decision = evaluate(&ctx);
        assert_eq!(decision.state, ShipState::Patrol);
        assert_eq!(decision.target, None);
    }

    #[test]
    fn test_nearest_prefers_first_on_tie() {
        let origin = Position::new(0.0, 0.0);
        let candidates = vec![
            (EntityId(1), Position::new(100.0, 0.0)),
            (EntityId(2), Position::new(0.0, 50.0)),
            (EntityId(3), Position::new(-50.0, 0.0)),
        ];
        let (id, distance) = nearest(&origin, candidates).unwrap();
        assert_eq!(id, EntityId(2));
        assert!((distance - 50.0).abs() < 1e-12);
        assert!(nearest(&origin, Vec::new()).is_none());
    }

    #[test]
    fn test_destination_by_state() {
        let target = Position::new(500.0, 500.0);

        let d = destination(ShipState::AttackShip, Some(target));
        assert_eq!(d, Destination::Target(target));
        assert_eq!(
            destination(ShipState::Retreat, Some(target)),
            Destination::PatrolCenter
        );
        assert_eq!(destination(ShipState::Patrol, None), Destination::Waypoint);
        assert_eq!(
            destination(ShipState::AssaultCore, None),
            Destination::Waypoint,
            "unresolved target falls back to the waypoint"
        );
    }

    #[test]
    fn test_turn_is_rate_limited() {
        let from = Position::new(0.0, 0.0);
        let to = Position::new(0.0, 100.0); // bearing π/2
        let max_turn = 3.8 / 60.0;
        let heading = turn_towards(0.0, &from, &to, max_turn);
        assert!((heading - max_turn).abs() < 1e-12);

        // Small corrections land exactly on the bearing
        let heading = turn_towards(FRAC_PI_2 - 0.01, &from, &to, max_turn);
        assert!((heading - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_turn_takes_shortest_way_round() {
        let from = Position::new(0.0, 0.0);
        // Heading just under π, target just past -π: turn positive through the wrap
        let to = Position::new(-100.0, -1.0);
        let heading = turn_towards(PI - 0.02, &from, &to, 0.1);
        assert!(heading < -PI + 0.1, "expected wrap past π, got {heading}");
    }

    #[test]
    fn test_turn_ignores_point_blank_destination() {
        let from = Position::new(10.0, 10.0);
        let to = Position::new(10.5, 10.0);
        assert_eq!(turn_towards(1.0, &from, &to, 0.5), 1.0);
    }

    #[test]
    fn test_firing_cone() {
        let from = Position::new(0.0, 0.0);
        let cone = 40f64.to_radians();
        let ahead = Position::new(200.0, 0.0);
        assert!(in_firing_cone(0.0, &from, &ahead, cone));

        // 19° off the bow is inside a 40° cone, 21° is not
        let inside = from.project(19f64.to_radians(), 200.0);
        let outside = from.project(21f64.to_radians(), 200.0);
        assert!(in_firing_cone(0.0, &from, &inside, cone));
        assert!(!in_firing_cone(0.0, &from, &outside, cone));

        let behind = Position::new(-200.0, 0.0);
        assert!(!in_firing_cone(0.0, &from, &behind, cone));
        assert!(!in_firing_cone(0.0, &from, &from, cone));
    }

    #[test]
    fn test_waypoint_regeneration() {
        let center = Position::new(0.0, 0.0);
        let waypoint = Position::new(180.0, 0.0);
        assert!(!needs_new_waypoint(
            &Position::new(0.0, 0.0),
            &center,
            180.0,
            &waypoint
        ));
        // Drifted off the patrol circle
        assert!(needs_new_waypoint(
            &Position::new(0.0, 181.0),
            &center,
            180.0,
            &waypoint
        ));
        // Reached the waypoint
        assert!(needs_new_waypoint(
            &Position::new(130.0, 0.0),
            &center,
            180.0,
            &waypoint
        ));
    }

    #[test]
    fn test_modifier_decay_drops_expired() {
        let mut list = vec![
            Modifier {
                factor: 1.6,
                remaining_ticks: 1,
            },
            Modifier {
                factor: 1.6,
                remaining_ticks: 3,
            },
        ];
        modifiers::tick(&mut list);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].remaining_ticks, 2);
        modifiers::tick(&mut list);
        modifiers::tick(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_modifier_products_stack() {
        let mut mods = Modifiers::default();
        assert_eq!(modifiers::speed_multiplier(&mods), 1.0);
        assert_eq!(modifiers::damage_multiplier(&mods), 1.0);

        mods.buffs.push(Modifier {
            factor: 1.6,
            remaining_ticks: 360,
        });
        mods.buffs.push(Modifier {
            factor: 1.6,
            remaining_ticks: 100,
        });
        mods.debuffs.push(Modifier {
            factor: 0.4,
            remaining_ticks: 240,
        });
        assert!((modifiers::damage_multiplier(&mods) - 2.56).abs() < 1e-12);
        assert!((modifiers::speed_multiplier(&mods) - 1.024).abs() < 1e-12);

        modifiers::tick_all(&mut mods);
        assert_eq!(mods.buffs[1].remaining_ticks, 99);
        assert_eq!(mods.debuffs[0].remaining_ticks, 239);
    }
}
