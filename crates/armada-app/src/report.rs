//! Fleet report: per-faction standings distilled from a snapshot.
//!
//! Logged periodically during a run and once at the end.

use std::fmt;

use serde::Serialize;
use tracing::info;

use armada_core::enums::{Outcome, ShipState};
use armada_core::state::{CoreView, WorldSnapshot};

/// How many ships of a fleet are in each AI state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StateCounts {
    pub patrol: usize,
    pub attack_ship: usize,
    pub assault_core: usize,
    pub retreat: usize,
}

impl StateCounts {
    fn record(&mut self, state: ShipState) {
        match state {
            ShipState::Patrol => self.patrol += 1,
            ShipState::AttackShip => self.attack_ship += 1,
            ShipState::AssaultCore => self.assault_core += 1,
            ShipState::Retreat => self.retreat += 1,
        }
    }
}

/// Standing of one living faction.
#[derive(Debug, Clone, Serialize)]
pub struct FactionReport {
    pub faction: u32,
    pub core_health: f64,
    /// Core health as a percentage of max.
    pub health_pct: f64,
    pub shield: f64,
    pub ships: usize,
    pub max_ships: usize,
    pub resources: f64,
    pub kills: u32,
    pub damage_dealt: f64,
    pub ships_lost: u32,
    pub states: StateCounts,
}

impl FactionReport {
    fn from_core(core: &CoreView) -> Self {
        let mut states = StateCounts::default();
        for ship in &core.ships {
            states.record(ship.state);
        }
        Self {
            faction: core.faction,
            core_health: core.health,
            health_pct: if core.max_health > 0.0 {
                core.health / core.max_health * 100.0
            } else {
                0.0
            },
            shield: core.shield,
            ships: core.ships.len(),
            max_ships: core.max_ships,
            resources: core.resources,
            kills: core.kills,
            damage_dealt: core.damage_dealt,
            ships_lost: core.ships_lost,
            states,
        }
    }
}

/// Standings of every living faction, strongest core first.
#[derive(Debug, Clone, Serialize)]
pub struct FleetReport {
    pub tick: u64,
    pub outcome: Outcome,
    pub factions: Vec<FactionReport>,
}

impl FleetReport {
    pub fn from_snapshot(snapshot: &WorldSnapshot) -> Self {
        let mut factions: Vec<FactionReport> =
            snapshot.cores.iter().map(FactionReport::from_core).collect();
        // Stable sort: equal health keeps faction order.
        factions.sort_by(|a, b| b.core_health.total_cmp(&a.core_health));
        Self {
            tick: snapshot.time.tick,
            outcome: snapshot.outcome,
            factions,
        }
    }

    pub fn total_ships(&self) -> usize {
        self.factions.iter().map(|f| f.ships).sum()
    }

    /// One structured log line per faction.
    pub fn log(&self) {
        info!(
            tick = self.tick,
            outcome = ?self.outcome,
            factions = self.factions.len(),
            ships = self.total_ships(),
            "fleet report"
        );
        for f in &self.factions {
            info!(
                faction = f.faction,
                health = format_args!("{:.0}", f.core_health),
                health_pct = format_args!("{:.1}", f.health_pct),
                shield = format_args!("{:.0}", f.shield),
                ships = f.ships,
                max_ships = f.max_ships,
                resources = format_args!("{:.1}", f.resources),
                kills = f.kills,
                damage_dealt = format_args!("{:.0}", f.damage_dealt),
                ships_lost = f.ships_lost,
                patrol = f.states.patrol,
                attack = f.states.attack_ship,
                assault = f.states.assault_core,
                retreat = f.states.retreat,
                "faction standing"
            );
        }
    }
}

impl fmt::Display for FleetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tick {} ({:?})", self.tick, self.outcome)?;
        writeln!(
            f,
            "{:>7} {:>7} {:>6} {:>6} {:>7} {:>5} {:>5} {:>7} {:>4}  P/A/C/R",
            "faction", "health", "hp%", "shield", "ships", "res", "kills", "dealt", "lost"
        )?;
        for r in &self.factions {
            writeln!(
                f,
                "{:>7} {:>7.0} {:>5.1}% {:>6.0} {:>3}/{:<3} {:>5.0} {:>5} {:>7.0} {:>4}  {}/{}/{}/{}",
                r.faction,
                r.core_health,
                r.health_pct,
                r.shield,
                r.ships,
                r.max_ships,
                r.resources,
                r.kills,
                r.damage_dealt,
                r.ships_lost,
                r.states.patrol,
                r.states.attack_ship,
                r.states.assault_core,
                r.states.retreat,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armada_core::types::{EntityId, Position, Velocity};
    use armada_sim::{SimConfig, SimulationEngine};

    fn core(faction: u32, health: f64) -> CoreView {
        CoreView {
            id: EntityId(faction as u64 + 1),
            faction,
            position: Position::new(500.0, 500.0),
            velocity: Velocity::default(),
            radius: 30.0,
            health,
            max_health: 1500.0,
            shield: 100.0,
            max_shield: 100.0,
            resources: 100.0,
            max_ships: 35,
            flashing: false,
            kills: 0,
            ships_lost: 0,
            damage_dealt: 0.0,
            damage_taken: 0.0,
            ships: Vec::new(),
        }
    }

    #[test]
    fn test_factions_sorted_by_core_health() {
        let snapshot = WorldSnapshot {
            cores: vec![core(0, 600.0), core(1, 1500.0), core(2, 600.0), core(3, 900.0)],
            ..Default::default()
        };
        let report = FleetReport::from_snapshot(&snapshot);
        let order: Vec<u32> = report.factions.iter().map(|f| f.faction).collect();
        assert_eq!(order, vec![1, 3, 0, 2], "ties keep faction order");
        assert!((report.factions[1].health_pct - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_state_counts_cover_every_ship() {
        let mut engine = SimulationEngine::new(SimConfig {
            seed: 9,
            ..Default::default()
        })
        .unwrap();
        let mut snapshot = engine.tick();
        for _ in 0..400 {
            snapshot = engine.tick();
        }
        let report = FleetReport::from_snapshot(&snapshot);
        let ships: usize = snapshot.cores.iter().map(|c| c.ships.len()).sum();
        assert!(ships > 0, "fleets should have launched by now");
        assert_eq!(report.total_ships(), ships);
        for f in &report.factions {
            let s = f.states;
            assert_eq!(s.patrol + s.attack_ship + s.assault_core + s.retreat, f.ships);
        }
    }

    #[test]
    fn test_display_has_a_row_per_faction() {
        let snapshot = WorldSnapshot {
            cores: vec![core(0, 1500.0), core(4, 700.0)],
            ..Default::default()
        };
        let text = FleetReport::from_snapshot(&snapshot).to_string();
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("tick 0 (InProgress)"));
    }
}
