//! All simulation entity types, mostly data.  Behaviour lives in
//! `archetypes` (player), `enemies` (enemy + boss) and `world` (collisions).

use crate::archetypes::Archetype;
use crate::tuning::{
    ENEMY_BULLET_SIZE, OFFSCREEN_MARGIN, PLAYER_BULLET_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH,
};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in playfield units.  Edges touching is not an overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

/// Shared shape of everything in the simulation: a centred box plus a
/// liveness flag.  Dead bodies stay in their collection until the end-of-tick
/// reap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Centre, horizontal.
    pub x: f32,
    /// Centre, vertical (grows downwards).
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height, alive: true }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            left: self.left(),
            top: self.top(),
            right: self.right(),
            bottom: self.bottom(),
        }
    }

    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Both bodies live and boxes intersecting.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.alive && other.alive && self.rect().overlaps(&other.rect())
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

/// Appearance tag for projectiles; purely cosmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tint {
    Cyan,
    Salmon,
    Green,
    Talisman,
    Yellow,
    Charged,
    Blade,
    EnemyOrb,
}

/// Optional projectile properties.  `life == 0` means unbounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotFlags {
    pub damage: u32,
    pub pierce: bool,
    pub melee: bool,
    pub life: u32,
    /// Width and height; `None` picks the side's default.
    pub size: Option<(f32, f32)>,
}

impl Default for ShotFlags {
    fn default() -> Self {
        Self { damage: 1, pierce: false, melee: false, life: 0, size: None }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub body: Body,
    pub vx: f32,
    pub vy: f32,
    pub tint: Tint,
    pub damage: u32,
    /// Survives a hit that would otherwise consume it.
    pub pierce: bool,
    /// Erases enemy projectiles it touches without being consumed.
    pub melee: bool,
    /// Remaining ticks for short-lived shots; `None` lives until it leaves
    /// the screen margin.
    pub life: Option<u32>,
    side: Side,
}

impl Projectile {
    /// New live projectile centred on `(x, y)`.
    pub fn spawn(x: f32, y: f32, vx: f32, vy: f32, side: Side, tint: Tint, flags: ShotFlags) -> Self {
        let (width, height) = flags.size.unwrap_or(match side {
            Side::Player => (PLAYER_BULLET_SIZE, PLAYER_BULLET_SIZE),
            Side::Enemy => (ENEMY_BULLET_SIZE, ENEMY_BULLET_SIZE),
        });
        Self {
            body: Body::new(x, y, width, height),
            vx,
            vy,
            tint,
            damage: flags.damage.max(1),
            pierce: flags.pierce,
            melee: flags.melee,
            life: (flags.life > 0).then_some(flags.life),
            side,
        }
    }

    /// Fixed at creation.
    pub fn side(&self) -> Side {
        self.side
    }

    /// One tick of travel.  Bounded shots die when their counter runs out,
    /// unbounded ones when they clear the off-screen margin.
    pub fn advance(&mut self) {
        if !self.body.alive {
            return;
        }
        self.body.x += self.vx;
        self.body.y += self.vy;

        match self.life.as_mut() {
            Some(remaining) => {
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    self.body.kill();
                }
            }
            None => {
                if self.beyond_margin() {
                    self.body.kill();
                }
            }
        }
    }

    /// Box lies entirely outside the screen extended by the margin.
    pub fn beyond_margin(&self) -> bool {
        let r = self.body.rect();
        r.bottom < -OFFSCREEN_MARGIN
            || r.top > SCREEN_HEIGHT + OFFSCREEN_MARGIN
            || r.right < -OFFSCREEN_MARGIN
            || r.left > SCREEN_WIDTH + OFFSCREEN_MARGIN
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotMode {
    /// 2-way (±10°) spread on the slow cadence.
    Twin,
    /// Single forward stream on the fast cadence.
    Single,
}

/// Archetype-specific mutable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gear {
    Standard,
    Switch { mode: ShotMode, last_toggle: Option<u64> },
    Charge { charging: bool, charge: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Body,
    pub archetype: Archetype,
    pub speed: f32,
    /// Minimum ticks between shots (the Switch gear overrides it per mode).
    pub shot_interval: u64,
    /// Tick of the last shot; `None` until the first one.
    pub last_shot: Option<u64>,
    pub gear: Gear,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Falls straight down.
    Normal,
    /// Weaves sideways on a sine wave while falling.
    Wavy,
    /// Falls slowly and fires at the player.
    Shooter,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    /// Sine phase for `Wavy`.
    pub phase: f32,
    /// Ticks since the last aimed shot for `Shooter`.
    pub fire_timer: u32,
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossPhase {
    /// Descending to its battle depth; does not fire.
    Entering,
    /// Weaving and emitting the rotating cross.
    Battling,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub body: Body,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub phase: BossPhase,
    /// Accumulated danmaku rotation, degrees.
    pub angle: f32,
    /// Ticks spent battling.
    pub timer: u32,
}
