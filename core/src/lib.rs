#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Pixel Shooter engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command
//! batches.
//!
//! The crate also hosts the shared geometry utility: [`Rect`], the
//! [`overlaps`] predicate, and the canonical bounds constructors, so the
//! world, the systems, and the presentation adapters agree on a single set
//! of collision and sprite rectangles.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Pixel Shooter.";

/// Width of the logical arena measured in world units.
pub const ARENA_WIDTH: f32 = 96.0;

/// Height of the logical arena measured in world units.
pub const ARENA_HEIGHT: f32 = 128.0;

/// Width of the player ship's collision hull.
pub const PLAYER_WIDTH: f32 = 7.0;

/// Height of the player ship's collision hull.
pub const PLAYER_HEIGHT: f32 = 6.0;

/// Hull height shared by every enemy regardless of width class.
pub const ENEMY_HEIGHT: f32 = 6.0;

/// Width of a bullet's visual footprint.
pub const BULLET_VISUAL_WIDTH: f32 = 2.0;

/// Height of a bullet's visual footprint.
pub const BULLET_VISUAL_HEIGHT: f32 = 3.0;

/// Width of the inflated box a bullet presents to collision tests.
pub const BULLET_STRIKE_WIDTH: f32 = 2.0;

/// Height of the inflated box a bullet presents to collision tests.
pub const BULLET_STRIKE_HEIGHT: f32 = 4.0;

/// Player control flags sampled once per simulation step.
///
/// Merging keyboard state into these five booleans is the host adapter's
/// responsibility; the world treats the flags as authoritative for the step
/// they accompany.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Intent {
    /// Move the player toward decreasing x this step.
    pub left: bool,
    /// Move the player toward increasing x this step.
    pub right: bool,
    /// Move the player toward decreasing y this step.
    pub up: bool,
    /// Move the player toward increasing y this step.
    pub down: bool,
    /// Request a shot this step; ignored while the fire cooldown is live.
    pub fire: bool,
}

impl Intent {
    /// Intent with every flag cleared.
    pub const NONE: Self = Self {
        left: false,
        right: false,
        up: false,
        down: false,
        fire: false,
    };
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Resets all run state and transitions the world into an active run.
    Start,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick,
        /// already clamped by the driver.
        dt: Duration,
        /// Player control flags sampled for this step.
        intent: Intent,
    },
    /// Requests that a fully parameterised enemy enter the arena.
    SpawnEnemy {
        /// Width class drawn for the enemy.
        class: EnemyClass,
        /// Left edge of the enemy hull measured in arena units.
        x: f32,
        /// Downward drift speed measured in units per frame unit.
        speed: f32,
    },
    /// Requests that the identified enemy fire a bullet downward.
    FireEnemyBullet {
        /// Identifier of the enemy returning fire.
        enemy: EnemyId,
    },
    /// Resolves every collision present after the step's motion and spawns.
    ResolveCollisions,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Announces that run state was reset and an active run began.
    RunStarted,
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an enemy entered the arena.
    EnemySpawned {
        /// Identifier assigned to the enemy by the world.
        enemy: EnemyId,
        /// Width class of the spawned enemy.
        class: EnemyClass,
        /// Left edge of the enemy hull at spawn.
        x: f32,
    },
    /// Confirms that an enemy was destroyed by player fire.
    EnemyDestroyed {
        /// Identifier of the destroyed enemy.
        enemy: EnemyId,
    },
    /// Reports the score total after it increased.
    ScoreChanged {
        /// Score total after the change.
        score: u32,
    },
    /// Reports that the player lost a life.
    LifeLost {
        /// Lives remaining after the loss.
        lives: u32,
        /// Loss path that consumed the life.
        cause: LifeLossCause,
    },
    /// Announces that lives reached zero and the run ended.
    GameOver {
        /// Final score of the completed run.
        score: u32,
    },
}

/// Loss paths that can consume one of the player's lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifeLossCause {
    /// An enemy bullet struck the player hull.
    EnemyBullet,
    /// An enemy hull overlapped the player hull.
    EnemyContact,
    /// An enemy slipped past the bottom of the arena.
    EnemyBreach,
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Width classes an enemy can spawn with.
///
/// The class fixes the hull width, the spawn hit-points, and the muzzle
/// offset used when the enemy returns fire; hull height is shared through
/// [`ENEMY_HEIGHT`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyClass {
    /// Narrow three-unit hull.
    Scout,
    /// Four-unit hull.
    Raider,
    /// Six-unit hull that absorbs an extra hit.
    Cruiser,
}

impl EnemyClass {
    /// Hull width measured in arena units.
    #[must_use]
    pub const fn width(self) -> f32 {
        match self {
            Self::Scout => 3.0,
            Self::Raider => 4.0,
            Self::Cruiser => 6.0,
        }
    }

    /// Hit-points the class spawns with; only hulls wider than four units
    /// take a second hit.
    #[must_use]
    pub const fn hit_points(self) -> u8 {
        match self {
            Self::Scout | Self::Raider => 1,
            Self::Cruiser => 2,
        }
    }

    /// Horizontal offset from the hull's left edge to its muzzle, the floor
    /// of half the hull width.
    #[must_use]
    pub const fn muzzle_offset(self) -> f32 {
        match self {
            Self::Scout => 1.0,
            Self::Raider => 2.0,
            Self::Cruiser => 3.0,
        }
    }
}

/// Origin tag distinguishing player fire from enemy fire.
///
/// The tag selects which collision pass examines the bullet and which colour
/// presentation adapters render it with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulletOrigin {
    /// Fired by the player; tested against enemy hulls.
    Player,
    /// Fired by an enemy; tested against the player hull.
    Enemy,
}

/// Axis-aligned rectangle expressed in arena units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge of the rectangle.
    pub x: f32,
    /// Top edge of the rectangle.
    pub y: f32,
    /// Horizontal extent of the rectangle.
    pub w: f32,
    /// Vertical extent of the rectangle.
    pub h: f32,
}

impl Rect {
    /// Creates a new rectangle from its top-left corner and extents.
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Reports whether two rectangles share positive area.
///
/// The separating-axis comparisons are strict, so a rectangle ending exactly
/// where another begins does not overlap it. Total for all real-valued
/// inputs, including degenerate extents.
#[must_use]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    !(a.x + a.w <= b.x || b.x + b.w <= a.x || a.y + a.h <= b.y || b.y + b.h <= a.y)
}

/// Collision hull occupied by the player ship at the provided position.
#[must_use]
pub const fn player_bounds(x: f32, y: f32) -> Rect {
    Rect::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT)
}

/// Collision hull occupied by an enemy of `class` at the provided position.
#[must_use]
pub const fn enemy_bounds(class: EnemyClass, x: f32, y: f32) -> Rect {
    Rect::new(x, y, class.width(), ENEMY_HEIGHT)
}

/// Inflated box a bullet anchored at the provided position presents to
/// collision tests: one unit further left and two units further up than the
/// visual footprint.
#[must_use]
pub const fn bullet_strike_box(x: f32, y: f32) -> Rect {
    Rect::new(x - 1.0, y - 2.0, BULLET_STRIKE_WIDTH, BULLET_STRIKE_HEIGHT)
}

/// Visual footprint of a bullet sprite anchored at the provided position.
#[must_use]
pub const fn bullet_visual_bounds(x: f32, y: f32) -> Rect {
    Rect::new(x, y, BULLET_VISUAL_WIDTH, BULLET_VISUAL_HEIGHT)
}

/// Immutable representation of the player ship used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Left edge of the player hull.
    pub x: f32,
    /// Top edge of the player hull.
    pub y: f32,
    /// Steps remaining before the player may fire again.
    pub cooldown: u8,
}

impl PlayerSnapshot {
    /// Collision hull occupied by the player at the captured position.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        player_bounds(self.x, self.y)
    }
}

/// Immutable representation of a single bullet used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BulletSnapshot {
    /// Horizontal anchor of the bullet.
    pub x: f32,
    /// Vertical anchor of the bullet.
    pub y: f32,
    /// Signed vertical velocity measured in units per frame unit.
    pub velocity_y: f32,
    /// Whether the player or an enemy fired the bullet.
    pub origin: BulletOrigin,
}

impl BulletSnapshot {
    /// Inflated box the bullet presents to collision tests.
    #[must_use]
    pub const fn strike_box(&self) -> Rect {
        bullet_strike_box(self.x, self.y)
    }

    /// Visual footprint of the bullet sprite.
    #[must_use]
    pub const fn visual_bounds(&self) -> Rect {
        bullet_visual_bounds(self.x, self.y)
    }
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Width class drawn at spawn.
    pub class: EnemyClass,
    /// Left edge of the enemy hull.
    pub x: f32,
    /// Top edge of the enemy hull.
    pub y: f32,
    /// Downward drift speed measured in units per frame unit.
    pub speed: f32,
    /// Hits the enemy can still absorb.
    pub hit_points: u8,
}

impl EnemySnapshot {
    /// Collision hull occupied by the enemy at the captured position.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        enemy_bounds(self.class, self.x, self.y)
    }
}

/// Read-only snapshot describing all enemies within the arena.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in identifier order, which
    /// matches spawn order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Complete observable simulation state captured after a step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Player ship state.
    pub player: PlayerSnapshot,
    /// Every live bullet in store order.
    pub bullets: Vec<BulletSnapshot>,
    /// Every live enemy in spawn order.
    pub enemies: Vec<EnemySnapshot>,
    /// Score accumulated during the current run.
    pub score: u32,
    /// Lives remaining in the current run.
    pub lives: u32,
    /// Whether a run is active; `false` freezes the simulation.
    pub running: bool,
}

#[cfg(test)]
mod tests {
    use super::{
        bullet_strike_box, bullet_visual_bounds, overlaps, BulletOrigin, BulletSnapshot,
        EnemyClass, EnemyId, EnemySnapshot, EnemyView, PlayerSnapshot, Rect, Snapshot,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn overlapping_rectangles_are_detected() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);
        let b = Rect::new(3.0, 3.0, 4.0, 4.0);
        assert!(overlaps(a, b));
        assert!(overlaps(b, a));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);
        let flush_right = Rect::new(4.0, 0.0, 4.0, 4.0);
        let flush_below = Rect::new(0.0, 4.0, 4.0, 4.0);
        assert!(!overlaps(a, flush_right));
        assert!(!overlaps(flush_right, a));
        assert!(!overlaps(a, flush_below));
        assert!(!overlaps(flush_below, a));
    }

    #[test]
    fn separated_rectangles_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let shifted_right = Rect::new(10.0, 0.0, 2.0, 2.0);
        let shifted_down = Rect::new(0.0, 50.0, 2.0, 2.0);
        assert!(!overlaps(a, shifted_right));
        assert!(!overlaps(a, shifted_down));
    }

    #[test]
    fn negative_extents_never_overlap() {
        let degenerate = Rect::new(5.0, 5.0, -3.0, -3.0);
        let surrounding = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(degenerate, surrounding));
        assert!(!overlaps(surrounding, degenerate));
    }

    #[test]
    fn enemy_classes_match_balance_table() {
        assert_eq!(EnemyClass::Scout.width(), 3.0);
        assert_eq!(EnemyClass::Raider.width(), 4.0);
        assert_eq!(EnemyClass::Cruiser.width(), 6.0);

        assert_eq!(EnemyClass::Scout.hit_points(), 1);
        assert_eq!(EnemyClass::Raider.hit_points(), 1);
        assert_eq!(EnemyClass::Cruiser.hit_points(), 2);

        assert_eq!(EnemyClass::Scout.muzzle_offset(), 1.0);
        assert_eq!(EnemyClass::Raider.muzzle_offset(), 2.0);
        assert_eq!(EnemyClass::Cruiser.muzzle_offset(), 3.0);
    }

    #[test]
    fn bullet_strike_box_inflates_visual_anchor() {
        let strike = bullet_strike_box(10.0, 20.0);
        assert_eq!(strike, Rect::new(9.0, 18.0, 2.0, 4.0));

        let visual = bullet_visual_bounds(10.0, 20.0);
        assert_eq!(visual, Rect::new(10.0, 20.0, 2.0, 3.0));
    }

    #[test]
    fn enemy_view_sorts_snapshots_by_identifier() {
        let view = EnemyView::from_snapshots(vec![
            enemy_snapshot(7, 30.0),
            enemy_snapshot(2, 10.0),
            enemy_snapshot(5, 20.0),
        ]);

        let ids: Vec<u32> = view.iter().map(|snapshot| snapshot.id.get()).collect();
        assert_eq!(ids, vec![2, 5, 7]);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn enemy_id_round_trips_through_bincode() {
        let enemy_id = EnemyId::new(42);
        assert_round_trip(&enemy_id);
    }

    #[test]
    fn enemy_class_round_trips_through_bincode() {
        assert_round_trip(&EnemyClass::Cruiser);
    }

    #[test]
    fn snapshot_round_trips_through_bincode() {
        let snapshot = Snapshot {
            player: PlayerSnapshot {
                x: 44.0,
                y: 116.0,
                cooldown: 3,
            },
            bullets: vec![BulletSnapshot {
                x: 47.0,
                y: 90.0,
                velocity_y: -3.0,
                origin: BulletOrigin::Player,
            }],
            enemies: vec![enemy_snapshot(0, 12.0)],
            score: 40,
            lives: 2,
            running: true,
        };
        assert_round_trip(&snapshot);
    }

    fn enemy_snapshot(id: u32, x: f32) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            class: EnemyClass::Raider,
            x,
            y: 5.0,
            speed: 0.5,
            hit_points: 1,
        }
    }
}
