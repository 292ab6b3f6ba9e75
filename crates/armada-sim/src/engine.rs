//! Simulation engine: the driver of the battle.
//!
//! `SimulationEngine` owns the hecs ECS world, processes host commands,
//! runs all systems in a fixed order, and produces `WorldSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use armada_core::commands::HostCommand;
use armada_core::config::{ConfigError, GameConfig};
use armada_core::enums::{Outcome, SimPhase};
use armada_core::events::SimEvent;
use armada_core::state::WorldSnapshot;
use armada_core::types::SimTime;

use crate::feedback::Feedback;
use crate::handles::{entity_of, id_of, is_alive};
use crate::systems;
use crate::systems::ship::ShipPass;
use crate::world_setup::{self, PlacementReport, Shot};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: GameConfig,
    time: SimTime,
    phase: SimPhase,
    outcome: Outcome,
    rng: ChaCha8Rng,
    command_queue: VecDeque<HostCommand>,
    despawn_buffer: Vec<Entity>,
    fired: Vec<Shot>,
    feedback: Feedback,
    placement: PlacementReport,
}

impl SimulationEngine {
    /// Validate the configuration and build the initial world.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.game.validate()?;
        let mut engine = Self {
            world: World::new(),
            config: config.game.clone(),
            time: SimTime::default(),
            phase: SimPhase::default(),
            outcome: Outcome::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            fired: Vec::new(),
            feedback: Feedback::default(),
            placement: PlacementReport::default(),
        };
        engine.initialize(config.game)?;
        Ok(engine)
    }

    /// Rebuild the world from `config`, continuing the current RNG stream.
    /// An invalid configuration leaves the running world untouched.
    pub fn initialize(&mut self, config: GameConfig) -> Result<PlacementReport, ConfigError> {
        config.validate()?;
        self.config = config;
        self.rebuild();
        Ok(self.placement)
    }

    fn rebuild(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.feedback.reset();
        self.fired.clear();
        self.placement = world_setup::setup_world(&mut self.world, &mut self.rng, &self.config);
        self.outcome = self.evaluate_outcome();
    }

    /// Queue a host command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: HostCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = HostCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply queued commands, advance one step if running, and return the
    /// resulting snapshot.
    pub fn tick(&mut self) -> WorldSnapshot {
        self.process_commands();

        if self.phase == SimPhase::Running {
            self.step();
        } else {
            self.feedback.clear_requests();
        }

        self.snapshot()
    }

    /// Advance the simulation by exactly one tick, ignoring the pause state.
    pub fn step(&mut self) {
        self.feedback.clear_requests();
        self.run_systems();
        self.time.advance();

        let outcome = self.evaluate_outcome();
        if outcome != self.outcome {
            info!(tick = self.time.tick, ?outcome, "battle outcome changed");
            self.outcome = outcome;
        }
    }

    /// Read-only view of the current state. Carries the effect requests and
    /// events of the most recent step.
    pub fn snapshot(&self) -> WorldSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.outcome,
            &self.feedback,
        )
    }

    /// True once at most one faction core remains.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Get the current run phase.
    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Current impact feedback level.
    pub fn impact_feedback(&self) -> u32 {
        self.feedback.impact
    }

    /// What world setup managed to place.
    pub fn placement(&self) -> PlacementReport {
        self.placement
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for scenario tests.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single host command.
    fn handle_command(&mut self, command: HostCommand) {
        match command {
            HostCommand::Pause => self.phase = SimPhase::Paused,
            HostCommand::Resume => self.phase = SimPhase::Running,
            HostCommand::TogglePause => {
                self.phase = match self.phase {
                    SimPhase::Running => SimPhase::Paused,
                    SimPhase::Paused => SimPhase::Running,
                };
            }
            HostCommand::Restart => {
                info!("restarting battle");
                self.rebuild();
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Map object animation
        systems::map_objects::animate(&mut self.world);

        // 2. Tick-start views: living cores, their fleets, map objects
        let cores = systems::cores::living(&self.world);
        let ships = systems::ship::fleet(&self.world, &cores);
        let objects = systems::map_objects::ordered(&self.world);
        let obstacles = systems::map_objects::obstacles(&self.world);
        let pass = ShipPass {
            ships: &ships,
            cores: &cores,
            objects: &objects,
        };

        // 3. Each core in faction order: physics, production, then its ships
        for &(core, faction) in &cores {
            if !is_alive(&self.world, core) {
                continue;
            }
            systems::cores::update(&mut self.world, core, &cores, &obstacles, &self.config);

            if let Some(spot) = systems::shipyard::run(&mut self.world, core, &mut self.rng) {
                let ship = world_setup::spawn_ship(
                    &mut self.world,
                    &mut self.rng,
                    &self.config,
                    core,
                    faction,
                    spot,
                );
                systems::shipyard::enlist(&mut self.world, core, id_of(ship));
                debug!(ship = id_of(ship).0, faction, "ship spawned");
                self.feedback.event(SimEvent::ShipSpawned {
                    ship: id_of(ship),
                    faction,
                });
            }

            for id in systems::shipyard::roster(&self.world, core) {
                let Some(ship) = entity_of(id) else {
                    continue;
                };
                systems::ship::update(
                    &mut self.world,
                    ship,
                    &pass,
                    &mut self.rng,
                    &mut self.feedback,
                    &mut self.fired,
                );
            }
        }

        // 4. Launch this tick's shots, then fly every projectile
        for shot in self.fired.drain(..) {
            world_setup::spawn_projectile(&mut self.world, &shot);
        }
        systems::projectiles::run(&mut self.world, &mut self.feedback);

        // 5. Cleanup (spent projectiles, destroyed ships and cores)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        // 6. Map object respawn
        systems::map_objects::respawn(&mut self.world, &mut self.rng, &mut self.feedback);

        // 7. Feedback decay
        self.feedback.decay();

        trace!(
            tick = self.time.tick,
            cores = cores.len(),
            ships = ships.len(),
            "tick complete"
        );
    }

    /// Victory when exactly one core remains, draw when none do.
    fn evaluate_outcome(&self) -> Outcome {
        let cores = systems::cores::living(&self.world);
        match cores.as_slice() {
            [] => Outcome::Draw,
            [(_, faction)] => Outcome::Victory { faction: *faction },
            _ => Outcome::InProgress,
        }
    }
}
