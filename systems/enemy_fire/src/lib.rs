#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that lets enemies return fire with a small per-step chance.

use pixel_shooter_core::{Command, EnemyView, Event};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const FIRE_PROBABILITY: f64 = 0.002;

/// Configuration parameters required to construct the enemy fire system.
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

/// Emits downward fire commands for enemies that win the per-step draw.
///
/// Each enemy alive after the step's motion phase rolls independently, in
/// spawn order, so the command stream is fully determined by the seed and
/// the sequence of enemy views. A `RunStarted` event rewinds the random
/// stream.
#[derive(Debug)]
pub struct EnemyFire {
    rng_seed: u64,
    rng: ChaCha8Rng,
}

impl EnemyFire {
    /// Creates a new enemy fire system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng_seed: config.rng_seed,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and the current enemy view to emit fire commands.
    pub fn handle(&mut self, events: &[Event], enemies: &EnemyView, out: &mut Vec<Command>) {
        let mut advanced = false;
        for event in events {
            match event {
                Event::RunStarted => self.reset(),
                Event::TimeAdvanced { .. } => advanced = true,
                _ => {}
            }
        }

        if !advanced || enemies.is_empty() {
            return;
        }

        for enemy in enemies.iter() {
            if self.rng.gen_bool(FIRE_PROBABILITY) {
                out.push(Command::FireEnemyBullet { enemy: enemy.id });
            }
        }
    }

    fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.rng_seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_shooter_core::{EnemyClass, EnemyId, EnemySnapshot};
    use std::time::Duration;

    #[test]
    fn silent_without_time_advancing() {
        let mut system = EnemyFire::new(Config::new(11));
        let enemies = view_of(5);
        let mut out = Vec::new();

        system.handle(&[], &enemies, &mut out);
        system.handle(&[Event::RunStarted], &enemies, &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn empty_view_never_draws() {
        let mut system = EnemyFire::new(Config::new(11));
        let mut out = Vec::new();

        for _ in 0..1_000 {
            system.handle(&[advanced()], &EnemyView::default(), &mut out);
        }

        assert!(out.is_empty());
    }

    #[test]
    fn identical_seeds_fire_identically() {
        let first = fire_stream(0xdead_beef, 500);
        let second = fire_stream(0xdead_beef, 500);

        assert_eq!(first, second);
    }

    #[test]
    fn restart_rewinds_the_draw_stream() {
        let seed = 0x5eed;
        let expected = fire_stream(seed, 400);

        let mut system = EnemyFire::new(Config::new(seed));
        let enemies = view_of(4);
        let mut warmup = Vec::new();
        for _ in 0..37 {
            system.handle(&[advanced()], &enemies, &mut warmup);
        }

        let mut observed = Vec::new();
        system.handle(&[Event::RunStarted], &enemies, &mut observed);
        assert!(observed.is_empty());
        for _ in 0..400 {
            system.handle(&[advanced()], &enemies, &mut observed);
        }

        assert_eq!(observed, expected);
    }

    #[test]
    fn fire_commands_reference_enemies_from_the_view() {
        let mut system = EnemyFire::new(Config::new(0xfa11));
        let enemies = view_of(5);
        let mut out = Vec::new();

        for _ in 0..4_000 {
            system.handle(&[advanced()], &enemies, &mut out);
        }

        assert!(!out.is_empty(), "expected at least one fire in 20k draws");
        for command in &out {
            let Command::FireEnemyBullet { enemy } = command else {
                panic!("unexpected command emitted: {command:?}");
            };
            assert!(enemy.get() < 5);
        }
    }

    fn fire_stream(seed: u64, steps: u32) -> Vec<Command> {
        let mut system = EnemyFire::new(Config::new(seed));
        let enemies = view_of(4);
        let mut out = Vec::new();
        for _ in 0..steps {
            system.handle(&[advanced()], &enemies, &mut out);
        }
        out
    }

    fn view_of(count: u32) -> EnemyView {
        let snapshots = (0..count)
            .map(|id| EnemySnapshot {
                id: EnemyId::new(id),
                class: EnemyClass::Scout,
                x: 10.0 + id as f32,
                y: 4.0,
                speed: 0.5,
                hit_points: 1,
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    fn advanced() -> Event {
        Event::TimeAdvanced {
            dt: Duration::from_millis(16),
        }
    }
}
