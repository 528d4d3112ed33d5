#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting enemy spawn
//! commands at a score-driven cadence.

use std::time::Duration;

use pixel_shooter_core::{Command, EnemyClass, Event, ARENA_WIDTH};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const BASE_INTERVAL_MS: u64 = 700;
const INTERVAL_REDUCTION_PER_POINT_MS: u64 = 3;
const MAX_INTERVAL_REDUCTION_MS: u64 = 500;

const WIDE_CLASS_PROBABILITY: f64 = 0.2;
const MIN_DRIFT_SPEED: f32 = 0.25;
const MAX_DRIFT_SPEED: f32 = 0.85;

/// Configuration parameters required to construct the spawning system.
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

/// Pure system that paces enemy arrivals against the score-driven ramp.
///
/// The system accumulates simulated time from `TimeAdvanced` events and
/// emits at most one spawn command per step, once the accumulated wait
/// strictly exceeds the interval for the current score. A `RunStarted`
/// event rewinds both the timer and the random stream so every run draws
/// the same arrival sequence for a given seed.
#[derive(Debug)]
pub struct Spawning {
    rng_seed: u64,
    rng: ChaCha8Rng,
    accumulator: Duration,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng_seed: config.rng_seed,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            accumulator: Duration::ZERO,
        }
    }

    /// Consumes events and the current score to emit spawn commands.
    pub fn handle(&mut self, events: &[Event], score: u32, out: &mut Vec<Command>) {
        let mut accumulated = Duration::ZERO;
        for event in events {
            match event {
                Event::RunStarted => self.reset(),
                Event::TimeAdvanced { dt } => {
                    accumulated = accumulated.saturating_add(*dt);
                }
                _ => {}
            }
        }

        if accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        if self.accumulator <= spawn_interval(score) {
            return;
        }

        self.accumulator = Duration::ZERO;
        let command = self.draw_enemy();
        out.push(command);
    }

    fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.rng_seed);
        self.accumulator = Duration::ZERO;
    }

    fn draw_enemy(&mut self) -> Command {
        let class = self.draw_class();
        let x = self.draw_column(class);
        let speed = self.rng.gen_range(MIN_DRIFT_SPEED..MAX_DRIFT_SPEED);
        Command::SpawnEnemy { class, x, speed }
    }

    fn draw_class(&mut self) -> EnemyClass {
        if self.rng.gen_bool(WIDE_CLASS_PROBABILITY) {
            EnemyClass::Cruiser
        } else if self.rng.gen_bool(0.5) {
            EnemyClass::Raider
        } else {
            EnemyClass::Scout
        }
    }

    /// Draws a whole-unit left edge keeping the hull inside the arena with a
    /// one-unit margin on both sides.
    fn draw_column(&mut self, class: EnemyClass) -> f32 {
        let span = (ARENA_WIDTH - class.width()) as u32 - 2;
        let column = self.rng.gen_range(0..span) + 1;
        column as f32
    }
}

/// Wait between accepted spawns for the provided score: the base interval
/// shortened by three milliseconds per point, never below 200ms.
fn spawn_interval(score: u32) -> Duration {
    let reduction = u64::from(score)
        .saturating_mul(INTERVAL_REDUCTION_PER_POINT_MS)
        .min(MAX_INTERVAL_REDUCTION_MS);
    Duration::from_millis(BASE_INTERVAL_MS - reduction)
}
