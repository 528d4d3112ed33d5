#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Step driver that owns the authoritative world and pumps the pure systems.
//!
//! Each tick follows a fixed phase order: the clamped time delta and player
//! intent are applied as motion, the spawning and enemy fire systems then
//! translate the broadcast events into spawn and fire commands, and finally
//! a single collision resolution pass settles the step. Hosts never touch
//! the world directly; they call [`Simulation::start`], [`Simulation::step`]
//! and read [`Simulation::snapshot`].

use std::time::Duration;

use pixel_shooter_core::{Command, Event, Intent, Snapshot};
use pixel_shooter_system_enemy_fire::{Config as EnemyFireConfig, EnemyFire};
use pixel_shooter_system_spawning::{Config as SpawningConfig, Spawning};
use pixel_shooter_world::{self as world, query, World};

/// Largest time delta a single step may integrate; longer stalls are clamped.
pub const MAX_STEP: Duration = Duration::from_millis(40);

const SPAWNING_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;
const ENEMY_FIRE_SEED_SALT: u64 = 0x6a09_e667_f3bc_c908;

/// Configuration parameters required to construct a simulation.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Owns the world and the pure systems, advancing them in lockstep.
///
/// Every source of randomness lives inside the systems and derives from the
/// configured seed, so two simulations constructed with the same seed and
/// fed the same step sequence stay bit-for-bit identical.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    spawning: Spawning,
    enemy_fire: EnemyFire,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Simulation {
    /// Creates a new idle simulation whose random streams derive from the
    /// configured seed.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            world: World::new(),
            spawning: Spawning::new(SpawningConfig::new(config.rng_seed ^ SPAWNING_SEED_SALT)),
            enemy_fire: EnemyFire::new(EnemyFireConfig::new(
                config.rng_seed ^ ENEMY_FIRE_SEED_SALT,
            )),
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Resets all run state and begins an active run.
    ///
    /// The broadcast `RunStarted` event also rewinds the systems' random
    /// streams so a restarted run replays the same arrival sequence.
    pub fn start(&mut self) -> &[Event] {
        self.events.clear();
        world::apply(&mut self.world, Command::Start, &mut self.events);
        self.collect_system_commands();
        self.drain_commands();
        &self.events
    }

    /// Advances the simulation by one tick.
    ///
    /// The delta is clamped to [`MAX_STEP`]. While idle the step is a no-op
    /// that returns no events, so hosts can keep ticking to redraw a
    /// game-over frame. Returns the events the step produced.
    pub fn step(&mut self, dt: Duration, intent: Intent) -> &[Event] {
        self.events.clear();
        if !query::is_running(&self.world) {
            return &self.events;
        }

        let dt = dt.min(MAX_STEP);
        world::apply(
            &mut self.world,
            Command::Tick { dt, intent },
            &mut self.events,
        );
        self.collect_system_commands();
        self.drain_commands();
        world::apply(&mut self.world, Command::ResolveCollisions, &mut self.events);
        &self.events
    }

    /// Captures the complete observable state for presentation.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        query::snapshot(&self.world)
    }

    /// Reports whether a run is currently active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        query::is_running(&self.world)
    }

    /// Retrieves the welcome banner hosts may display on boot.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        query::welcome_banner(&self.world)
    }

    fn collect_system_commands(&mut self) {
        let score = query::score(&self.world);
        self.spawning.handle(&self.events, score, &mut self.commands);

        let enemies = query::enemy_view(&self.world);
        self.enemy_fire
            .handle(&self.events, &enemies, &mut self.commands);
    }

    fn drain_commands(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }
}
