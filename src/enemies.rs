//! Enemy and boss behaviour.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::{Body, Boss, BossPhase, Enemy, EnemyKind, Projectile, ShotFlags, Side, Tint};
use crate::tuning::{BOSS_SIZE, ENEMY_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};

// ── Enemy tuning ──────────────────────────────────────────────────────────────

const SPAWN_TOP: f32 = -50.0;
const WAVE_STEP: f32 = 0.1;
const WAVE_AMPLITUDE: f32 = 5.0;
/// Ticks between aimed shots of a `Shooter`.
pub const SHOOTER_PERIOD: u32 = 120;
const AIMED_SHOT_SPEED: f32 = 5.0;

// ── Boss tuning ───────────────────────────────────────────────────────────────

const BOSS_START_Y: f32 = -100.0;
const BOSS_ENTRY_SPEED: f32 = 2.0;
/// Top edge at which the boss stops descending and starts fighting.
pub const BOSS_BATTLE_TOP: f32 = 100.0;
const BOSS_WEAVE_FREQ: f32 = 0.05;
const BOSS_WEAVE_AMPLITUDE: f32 = 150.0;
/// The cross is emitted every this many battle ticks.
pub const DANMAKU_PERIOD: u32 = 5;
const DANMAKU_STEP_DEG: f32 = 12.0;
const DANMAKU_SPEED: f32 = 4.0;

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Normal, EnemyKind::Wavy, EnemyKind::Shooter];

    pub fn fall_speed(self) -> f32 {
        match self {
            EnemyKind::Normal => 3.0,
            EnemyKind::Wavy => 2.0,
            EnemyKind::Shooter => 1.0,
        }
    }
}

impl Enemy {
    /// Enemy whose left edge is at `left`, just above the screen.
    pub fn new(kind: EnemyKind, left: f32) -> Self {
        let half = ENEMY_SIZE / 2.0;
        Self {
            body: Body::new(left + half, SPAWN_TOP + half, ENEMY_SIZE, ENEMY_SIZE),
            kind,
            phase: 0.0,
            fire_timer: 0,
        }
    }

    /// Random kind at a random column.
    pub fn spawn(rng: &mut impl Rng) -> Self {
        let kind = *EnemyKind::ALL.choose(rng).unwrap_or(&EnemyKind::Normal);
        let left = rng.gen_range(0.0..SCREEN_WIDTH - ENEMY_SIZE);
        Self::new(kind, left)
    }

    /// One tick of motion.  A `Shooter` returns a shot aimed at `player`
    /// once per period.
    pub fn advance(&mut self, player: (f32, f32)) -> Option<Projectile> {
        if !self.body.alive {
            return None;
        }
        self.body.y += self.kind.fall_speed();

        let mut shot = None;
        match self.kind {
            EnemyKind::Normal => {}
            EnemyKind::Wavy => {
                self.phase += WAVE_STEP;
                self.body.x += self.phase.sin() * WAVE_AMPLITUDE;
            }
            EnemyKind::Shooter => {
                self.fire_timer += 1;
                if self.fire_timer >= SHOOTER_PERIOD {
                    self.fire_timer = 0;
                    shot = Some(self.aimed_shot(player));
                }
            }
        }

        if self.body.top() > SCREEN_HEIGHT {
            self.body.kill();
        }
        shot
    }

    fn aimed_shot(&self, (px, py): (f32, f32)) -> Projectile {
        let (x, y) = self.body.center();
        let angle = (py - y).atan2(px - x);
        Projectile::spawn(
            x,
            y,
            angle.cos() * AIMED_SHOT_SPEED,
            angle.sin() * AIMED_SHOT_SPEED,
            Side::Enemy,
            Tint::EnemyOrb,
            ShotFlags::default(),
        )
    }
}

impl Boss {
    pub fn new(level: u32, hp_per_level: u32) -> Self {
        let max_hp = hp_per_level.saturating_mul(level).max(1);
        Self {
            body: Body::new(SCREEN_WIDTH / 2.0, BOSS_START_Y, BOSS_SIZE, BOSS_SIZE),
            level,
            hp: max_hp,
            max_hp,
            phase: BossPhase::Entering,
            angle: 0.0,
            timer: 0,
        }
    }

    pub fn hp_ratio(&self) -> f32 {
        self.hp as f32 / self.max_hp as f32
    }

    /// Subtract `damage`, never below zero.  Returns true once defeated.
    pub fn take_hit(&mut self, damage: u32) -> bool {
        self.hp = self.hp.saturating_sub(damage);
        self.hp == 0
    }

    pub fn advance(&mut self) -> Vec<Projectile> {
        match self.phase {
            BossPhase::Entering => {
                self.body.y += BOSS_ENTRY_SPEED;
                if self.body.top() >= BOSS_BATTLE_TOP {
                    self.phase = BossPhase::Battling;
                }
                Vec::new()
            }
            BossPhase::Battling => {
                self.timer += 1;
                self.body.x = SCREEN_WIDTH / 2.0
                    + (self.timer as f32 * BOSS_WEAVE_FREQ).sin() * BOSS_WEAVE_AMPLITUDE;
                if self.timer % DANMAKU_PERIOD == 0 {
                    self.danmaku()
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Four shots at right angles, rotated a further step each volley.
    fn danmaku(&mut self) -> Vec<Projectile> {
        self.angle = (self.angle + DANMAKU_STEP_DEG) % 360.0;
        let (x, y) = self.body.center();
        (0..4)
            .map(|i| {
                let theta = (self.angle + 90.0 * i as f32).to_radians();
                Projectile::spawn(
                    x,
                    y,
                    theta.cos() * DANMAKU_SPEED,
                    theta.sin() * DANMAKU_SPEED,
                    Side::Enemy,
                    Tint::EnemyOrb,
                    ShotFlags::default(),
                )
            })
            .collect()
    }
}
