#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Pixel Shooter adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use pixel_shooter_core::{
    BulletOrigin, BulletSnapshot, EnemySnapshot, Intent, PlayerSnapshot, Rect, Snapshot,
    ARENA_HEIGHT, ARENA_WIDTH,
};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct FrameInput {
    /// Whether the adapter detected a held left movement control.
    pub left: bool,
    /// Whether the adapter detected a held right movement control.
    pub right: bool,
    /// Whether the adapter detected a held upward movement control.
    pub up: bool,
    /// Whether the adapter detected a held downward movement control.
    pub down: bool,
    /// Whether the adapter detected a held fire control.
    pub fire: bool,
    /// Whether the adapter detected a start press on this frame.
    pub start: bool,
}

impl FrameInput {
    /// Projects the held controls onto a simulation intent.
    ///
    /// The start control is deliberately absent from the projection; hosts
    /// route it to the simulation's start surface instead of a step.
    #[must_use]
    pub const fn intent(&self) -> Intent {
        Intent {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
            fire: self.fire,
        }
    }
}

/// Axis-aligned rectangle filled with a single color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneRect {
    /// Top-left corner of the rectangle in arena units.
    pub origin: Vec2,
    /// Extents of the rectangle in arena units.
    pub size: Vec2,
    /// Fill color of the rectangle.
    pub color: Color,
}

impl SceneRect {
    /// Creates a new filled rectangle descriptor.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2, color: Color) -> Self {
        Self {
            origin,
            size,
            color,
        }
    }

    /// Creates a filled rectangle from a core bounding box.
    #[must_use]
    pub const fn from_bounds(bounds: Rect, color: Color) -> Self {
        Self::new(
            Vec2::new(bounds.x, bounds.y),
            Vec2::new(bounds.w, bounds.h),
            color,
        )
    }
}

/// Player ship rendered as a hull with a canopy accent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Main hull of the ship.
    pub hull: SceneRect,
    /// Canopy accent drawn just above the hull.
    pub canopy: SceneRect,
}

impl PlayerPresentation {
    /// Fill color of the player hull.
    pub const HULL_COLOR: Color = Color::from_rgb_u8(0x66, 0xff, 0xcc);

    /// Fill color of the canopy accent.
    pub const CANOPY_COLOR: Color = Color::from_rgb_u8(0x33, 0xcc, 0x99);

    /// Builds the player presentation for a captured ship position.
    #[must_use]
    pub fn for_snapshot(player: &PlayerSnapshot) -> Self {
        let canopy = Rect::new(player.x + 2.0, player.y - 2.0, 3.0, 2.0);

        Self {
            hull: SceneRect::from_bounds(player.bounds(), Self::HULL_COLOR),
            canopy: SceneRect::from_bounds(canopy, Self::CANOPY_COLOR),
        }
    }
}

/// Enemy rendered as a hull with a dark intake stripe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Main hull of the enemy.
    pub hull: SceneRect,
    /// Intake stripe drawn across the upper hull.
    pub stripe: SceneRect,
}

impl EnemyPresentation {
    /// Hull fill while the enemy can absorb more than one hit.
    pub const ARMORED_COLOR: Color = Color::from_rgb_u8(0xff, 0xcc, 0x66);

    /// Hull fill once a single hit would destroy the enemy.
    pub const WEAKENED_COLOR: Color = Color::from_rgb_u8(0xff, 0x66, 0x66);

    /// Fill of the intake stripe.
    pub const STRIPE_COLOR: Color = Color::from_rgb_u8(0x22, 0x22, 0x00);

    /// Builds the enemy presentation for a captured enemy.
    #[must_use]
    pub fn for_snapshot(enemy: &EnemySnapshot) -> Self {
        let hull_color = if enemy.hit_points > 1 {
            Self::ARMORED_COLOR
        } else {
            Self::WEAKENED_COLOR
        };
        let stripe_width = (enemy.class.width() - 2.0).max(1.0);
        let stripe = Rect::new(enemy.x + 1.0, enemy.y + 1.0, stripe_width, 2.0);

        Self {
            hull: SceneRect::from_bounds(enemy.bounds(), hull_color),
            stripe: SceneRect::from_bounds(stripe, Self::STRIPE_COLOR),
        }
    }
}

/// Bullet rendered as a single filled rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletPresentation {
    /// Visual body of the bullet.
    pub body: SceneRect,
}

impl BulletPresentation {
    /// Fill color of bullets fired by the player.
    pub const PLAYER_COLOR: Color = Color::from_rgb_u8(0xff, 0xf1, 0xa8);

    /// Fill color of bullets fired by enemies.
    pub const ENEMY_COLOR: Color = Color::from_rgb_u8(0xff, 0x9a, 0x9a);

    /// Builds the bullet presentation for a captured bullet.
    #[must_use]
    pub fn for_snapshot(bullet: &BulletSnapshot) -> Self {
        let color = match bullet.origin {
            BulletOrigin::Player => Self::PLAYER_COLOR,
            BulletOrigin::Enemy => Self::ENEMY_COLOR,
        };

        Self {
            body: SceneRect::from_bounds(bullet.visual_bounds(), color),
        }
    }
}

/// Score, lives and run-state numbers surfaced to the HUD.
///
/// Text layout stays host-side; the contract carries only the values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HudPresentation {
    /// Score accumulated during the current run.
    pub score: u32,
    /// Lives remaining in the current run.
    pub lives: u32,
    /// Whether a run is active; hosts draw their idle overlay when `false`.
    pub running: bool,
}

impl HudPresentation {
    /// Creates a new HUD descriptor.
    #[must_use]
    pub const fn new(score: u32, lives: u32, running: bool) -> Self {
        Self {
            score,
            lives,
            running,
        }
    }
}

/// Describes the fixed logical arena and the scale hint for presenting it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArenaPresentation {
    /// Width of the logical arena in world units.
    pub width: f32,
    /// Height of the logical arena in world units.
    pub height: f32,
    /// Scale factor suggested for host pixel surfaces.
    pub pixel_scale: f32,
}

impl ArenaPresentation {
    /// Display scale used by hosts that do not pick their own.
    pub const DEFAULT_PIXEL_SCALE: f32 = 4.0;

    /// Creates a new arena descriptor spanning the full logical playfield.
    ///
    /// Returns an error when `pixel_scale` is not a positive, finite factor.
    pub fn new(pixel_scale: f32) -> std::result::Result<Self, RenderingError> {
        if !pixel_scale.is_finite() || pixel_scale <= 0.0 {
            return Err(RenderingError::InvalidPixelScale { pixel_scale });
        }

        Ok(Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            pixel_scale,
        })
    }

    /// Width of the host surface implied by the scale factor.
    #[must_use]
    pub const fn surface_width(&self) -> f32 {
        self.width * self.pixel_scale
    }

    /// Height of the host surface implied by the scale factor.
    #[must_use]
    pub const fn surface_height(&self) -> f32 {
        self.height * self.pixel_scale
    }
}

/// Scene description combining the arena backdrop and its inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Arena geometry backing the scene.
    pub arena: ArenaPresentation,
    /// Deterministic starfield drawn behind every entity.
    pub stars: Vec<SceneRect>,
    /// Player ship presentation.
    pub player: PlayerPresentation,
    /// Presentations for every live enemy in spawn order.
    pub enemies: Vec<EnemyPresentation>,
    /// Presentations for every live bullet in store order.
    pub bullets: Vec<BulletPresentation>,
    /// HUD values for the captured run.
    pub hud: HudPresentation,
}

impl Scene {
    /// Number of backdrop stars composed into every scene.
    pub const STAR_COUNT: u32 = 20;

    /// Fill used for every third backdrop star.
    pub const STAR_BRIGHT_COLOR: Color = Color::from_rgb_u8(0x2b, 0x3a, 0x4a);

    /// Fill used for the remaining backdrop stars.
    pub const STAR_DIM_COLOR: Color = Color::from_rgb_u8(0x0f, 0x20, 0x30);

    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        arena: ArenaPresentation,
        stars: Vec<SceneRect>,
        player: PlayerPresentation,
        enemies: Vec<EnemyPresentation>,
        bullets: Vec<BulletPresentation>,
        hud: HudPresentation,
    ) -> Self {
        Self {
            arena,
            stars,
            player,
            enemies,
            bullets,
            hud,
        }
    }
}

/// Composes the declarative scene for a world snapshot.
///
/// The starfield is derived purely from star indices, so scenes composed for
/// the same snapshot are identical across hosts and frames.
#[must_use]
pub fn compose_scene(snapshot: &Snapshot, arena: ArenaPresentation) -> Scene {
    Scene::new(
        arena,
        starfield(),
        PlayerPresentation::for_snapshot(&snapshot.player),
        snapshot
            .enemies
            .iter()
            .map(EnemyPresentation::for_snapshot)
            .collect(),
        snapshot
            .bullets
            .iter()
            .map(BulletPresentation::for_snapshot)
            .collect(),
        HudPresentation::new(snapshot.score, snapshot.lives, snapshot.running),
    )
}

fn starfield() -> Vec<SceneRect> {
    (0..Scene::STAR_COUNT)
        .map(|index| {
            let color = if index % 3 == 0 {
                Scene::STAR_BRIGHT_COLOR
            } else {
                Scene::STAR_DIM_COLOR
            };
            let x = (index * 7 % ARENA_WIDTH as u32) as f32;
            let y = (index * 13 % ARENA_HEIGHT as u32) as f32;

            SceneRect::new(Vec2::new(x, y), Vec2::splat(1.0), color)
        })
        .collect()
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Clear fill behind the starfield, matching the arena's night sky.
    pub const BACKDROP_COLOR: Color = Color::from_rgb_u8(0x00, 0x00, 0x11);

    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Pixel Shooter scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and may rebuild the scene
    /// before it is rendered, allowing adapters to animate world snapshots
    /// deterministically.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Pixel scale must be positive to avoid a zero-sized surface.
    InvalidPixelScale {
        /// Provided scale factor that failed validation.
        pixel_scale: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPixelScale { pixel_scale } => {
                write!(
                    f,
                    "pixel_scale must be a positive, finite factor (received {pixel_scale})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
