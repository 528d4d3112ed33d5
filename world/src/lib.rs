#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Pixel Shooter.

use std::time::Duration;

use pixel_shooter_core::{
    bullet_strike_box, enemy_bounds, overlaps, player_bounds, BulletOrigin, Command, EnemyClass,
    EnemyId, Event, Intent, LifeLossCause, Rect, ARENA_HEIGHT, ENEMY_HEIGHT, WELCOME_BANNER,
};

/// Left edge of the player hull at run start, the horizontally centred
/// position `(ARENA_WIDTH - PLAYER_WIDTH) / 2` floored to a whole unit.
const PLAYER_START_X: f32 = 44.0;
const PLAYER_START_Y: f32 = 116.0;

const PLAYER_SPEED_X: f32 = 1.5;
const PLAYER_SPEED_Y: f32 = 1.0;

const PLAYER_MIN_X: f32 = 1.0;
const PLAYER_MAX_X: f32 = 88.0;
const PLAYER_MIN_Y: f32 = 64.0;
const PLAYER_MAX_Y: f32 = 121.0;

const FIRE_COOLDOWN_STEPS: u8 = 14;
const PLAYER_MUZZLE_OFFSET: f32 = 3.0;
const BULLET_SPAWN_LIFT: f32 = 2.0;
const PLAYER_BULLET_VELOCITY: f32 = -3.0;
const ENEMY_BULLET_VELOCITY: f32 = 2.0;

const ENEMY_SPAWN_DEPTH: f32 = -8.0;
const ENEMY_SPEED_SCALE: f32 = 2.0;
const OUT_OF_BOUNDS_MARGIN: f32 = 10.0;

const STARTING_LIVES: u32 = 3;
const KILL_SCORE: u32 = 10;

const FRAME_UNIT_MICROS: f32 = 16_000.0;

/// Represents the authoritative Pixel Shooter world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    player: Player,
    bullets: Vec<Bullet>,
    enemies: Vec<Enemy>,
    next_enemy_id: u32,
    score: u32,
    lives: u32,
    running: bool,
}

impl World {
    /// Creates a new Pixel Shooter world in the idle state, ready for an
    /// explicit start command.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            player: Player::at_start(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            next_enemy_id: 0,
            score: 0,
            lives: STARTING_LIVES,
            running: false,
        }
    }

    fn reset_run(&mut self) {
        self.player = Player::at_start();
        self.bullets.clear();
        self.enemies.clear();
        self.next_enemy_id = 0;
        self.score = 0;
        self.lives = STARTING_LIVES;
    }

    fn integrate_player(&mut self, frames: f32, intent: Intent) {
        if intent.left {
            self.player.x -= PLAYER_SPEED_X * frames;
        }
        if intent.right {
            self.player.x += PLAYER_SPEED_X * frames;
        }
        if intent.up {
            self.player.y -= PLAYER_SPEED_Y * frames;
        }
        if intent.down {
            self.player.y += PLAYER_SPEED_Y * frames;
        }
        self.player.x = self.player.x.clamp(PLAYER_MIN_X, PLAYER_MAX_X);
        self.player.y = self.player.y.clamp(PLAYER_MIN_Y, PLAYER_MAX_Y);

        if intent.fire {
            self.fire_player_bullet();
        }
        self.player.cooldown = self.player.cooldown.saturating_sub(1);
    }

    fn fire_player_bullet(&mut self) {
        if self.player.cooldown > 0 {
            return;
        }

        self.bullets.push(Bullet {
            x: self.player.x + PLAYER_MUZZLE_OFFSET,
            y: self.player.y - BULLET_SPAWN_LIFT,
            velocity_y: PLAYER_BULLET_VELOCITY,
            origin: BulletOrigin::Player,
        });
        self.player.cooldown = FIRE_COOLDOWN_STEPS;
    }

    fn fire_enemy_bullet(&mut self, enemy: EnemyId) {
        let Some(source) = self.enemies.iter().find(|candidate| candidate.id == enemy) else {
            return;
        };

        self.bullets.push(Bullet {
            x: source.x + source.class.muzzle_offset(),
            y: source.y + ENEMY_HEIGHT + 1.0,
            velocity_y: ENEMY_BULLET_VELOCITY,
            origin: BulletOrigin::Enemy,
        });
    }

    fn integrate_bullets(&mut self, frames: f32) {
        for bullet in self.bullets.iter_mut() {
            bullet.y += bullet.velocity_y * frames;
        }
        self.bullets.retain(|bullet| !bullet.is_out_of_bounds());
    }

    fn integrate_enemies(&mut self, frames: f32, out_events: &mut Vec<Event>) {
        let mut index = 0;
        while index < self.enemies.len() {
            let enemy = &mut self.enemies[index];
            enemy.y += enemy.speed * frames * ENEMY_SPEED_SCALE;
            if enemy.has_breached() {
                let _ = self.enemies.remove(index);
                self.lose_life(LifeLossCause::EnemyBreach, out_events);
                continue;
            }
            index += 1;
        }
    }

    fn resolve_player_bullets(&mut self, out_events: &mut Vec<Event>) {
        let mut bullet_index = 0;
        while bullet_index < self.bullets.len() {
            let bullet = self.bullets[bullet_index];
            if bullet.origin != BulletOrigin::Player {
                bullet_index += 1;
                continue;
            }

            let strike = bullet.strike_box();
            let Some(enemy_index) = self
                .enemies
                .iter()
                .position(|enemy| overlaps(strike, enemy.bounds()))
            else {
                bullet_index += 1;
                continue;
            };

            let _ = self.bullets.remove(bullet_index);
            self.damage_enemy(enemy_index, out_events);
        }
    }

    fn damage_enemy(&mut self, index: usize, out_events: &mut Vec<Event>) {
        let enemy = &mut self.enemies[index];
        enemy.hit_points = enemy.hit_points.saturating_sub(1);
        if enemy.hit_points > 0 {
            return;
        }

        let destroyed = enemy.id;
        let _ = self.enemies.remove(index);
        self.score = self.score.saturating_add(KILL_SCORE);
        out_events.push(Event::EnemyDestroyed { enemy: destroyed });
        out_events.push(Event::ScoreChanged { score: self.score });
    }

    fn resolve_enemy_bullets(&mut self, out_events: &mut Vec<Event>) {
        let player_box = self.player.bounds();
        let mut bullet_index = 0;
        while bullet_index < self.bullets.len() {
            let bullet = self.bullets[bullet_index];
            if bullet.origin != BulletOrigin::Enemy || !overlaps(bullet.strike_box(), player_box)
            {
                bullet_index += 1;
                continue;
            }

            let _ = self.bullets.remove(bullet_index);
            self.lose_life(LifeLossCause::EnemyBullet, out_events);
        }
    }

    fn resolve_enemy_contact(&mut self, out_events: &mut Vec<Event>) {
        let player_box = self.player.bounds();
        let mut enemy_index = 0;
        while enemy_index < self.enemies.len() {
            if !overlaps(self.enemies[enemy_index].bounds(), player_box) {
                enemy_index += 1;
                continue;
            }

            let _ = self.enemies.remove(enemy_index);
            self.lose_life(LifeLossCause::EnemyContact, out_events);
        }
    }

    fn lose_life(&mut self, cause: LifeLossCause, out_events: &mut Vec<Event>) {
        self.lives = self.lives.saturating_sub(1);
        out_events.push(Event::LifeLost {
            lives: self.lives,
            cause,
        });

        if self.lives == 0 && self.running {
            self.running = false;
            out_events.push(Event::GameOver { score: self.score });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// A tick on an idle world is a no-op so hosts may keep submitting frames
/// while a game-over screen is displayed. The remaining step-phase commands
/// always execute: once a tick began on an active world, the driver finishes
/// the step's spawn and collision phases even if a life loss already ended
/// the run mid-step.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Start => {
            world.reset_run();
            world.running = true;
            out_events.push(Event::RunStarted);
        }
        Command::Tick { dt, intent } => {
            if !world.running {
                return;
            }

            out_events.push(Event::TimeAdvanced { dt });
            let frames = frame_units(dt);
            world.integrate_player(frames, intent);
            world.integrate_bullets(frames);
            world.integrate_enemies(frames, out_events);
        }
        Command::SpawnEnemy { class, x, speed } => {
            let enemy = EnemyId::new(world.next_enemy_id);
            world.next_enemy_id = world.next_enemy_id.saturating_add(1);
            world.enemies.push(Enemy {
                id: enemy,
                class,
                x,
                y: ENEMY_SPAWN_DEPTH,
                speed,
                hit_points: class.hit_points(),
            });
            out_events.push(Event::EnemySpawned { enemy, class, x });
        }
        Command::FireEnemyBullet { enemy } => {
            world.fire_enemy_bullet(enemy);
        }
        Command::ResolveCollisions => {
            world.resolve_player_bullets(out_events);
            world.resolve_enemy_bullets(out_events);
            world.resolve_enemy_contact(out_events);
        }
    }
}

/// Converts a tick duration into 16ms frame units, the time base all
/// velocities are expressed in. Resolves whole microseconds, so ticks
/// shorter than a millisecond still contribute their share of a frame.
fn frame_units(dt: Duration) -> f32 {
    dt.as_micros() as f32 / FRAME_UNIT_MICROS
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use pixel_shooter_core::{
        BulletSnapshot, EnemySnapshot, EnemyView, PlayerSnapshot, Snapshot,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Reports whether a run is currently active.
    #[must_use]
    pub fn is_running(world: &World) -> bool {
        world.running
    }

    /// Score accumulated during the current run.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Lives remaining in the current run.
    #[must_use]
    pub fn lives(world: &World) -> u32 {
        world.lives
    }

    /// Captures the player ship's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            x: world.player.x,
            y: world.player.y,
            cooldown: world.player.cooldown,
        }
    }

    /// Captures every live bullet in store order.
    #[must_use]
    pub fn bullets(world: &World) -> Vec<BulletSnapshot> {
        world
            .bullets
            .iter()
            .map(|bullet| BulletSnapshot {
                x: bullet.x,
                y: bullet.y,
                velocity_y: bullet.velocity_y,
                origin: bullet.origin,
            })
            .collect()
    }

    /// Captures a read-only view of the enemies inside the arena.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(enemy_snapshots(world))
    }

    /// Captures the complete observable state for presentation.
    #[must_use]
    pub fn snapshot(world: &World) -> Snapshot {
        Snapshot {
            player: player(world),
            bullets: bullets(world),
            enemies: enemy_snapshots(world),
            score: world.score,
            lives: world.lives,
            running: world.running,
        }
    }

    fn enemy_snapshots(world: &World) -> Vec<EnemySnapshot> {
        world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                class: enemy.class,
                x: enemy.x,
                y: enemy.y,
                speed: enemy.speed,
                hit_points: enemy.hit_points,
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug)]
struct Player {
    x: f32,
    y: f32,
    cooldown: u8,
}

impl Player {
    fn at_start() -> Self {
        Self {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            cooldown: 0,
        }
    }

    fn bounds(&self) -> Rect {
        player_bounds(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug)]
struct Bullet {
    x: f32,
    y: f32,
    velocity_y: f32,
    origin: BulletOrigin,
}

impl Bullet {
    fn strike_box(&self) -> Rect {
        bullet_strike_box(self.x, self.y)
    }

    fn is_out_of_bounds(&self) -> bool {
        self.y < -OUT_OF_BOUNDS_MARGIN || self.y > ARENA_HEIGHT + OUT_OF_BOUNDS_MARGIN
    }
}

#[derive(Clone, Copy, Debug)]
struct Enemy {
    id: EnemyId,
    class: EnemyClass,
    x: f32,
    y: f32,
    speed: f32,
    hit_points: u8,
}

impl Enemy {
    fn bounds(&self) -> Rect {
        enemy_bounds(self.class, self.x, self.y)
    }

    fn has_breached(&self) -> bool {
        self.y > ARENA_HEIGHT + OUT_OF_BOUNDS_MARGIN
    }
}
