//! Player archetypes.
//!
//! Every archetype shares the same record ([`Player`]) and movement; only the
//! firing pattern differs, selected by the [`Archetype`] tag.  Per-archetype
//! numbers come from [`Archetype::profile`], and the little state some
//! archetypes carry (shot mode, charge) lives in [`Gear`].

use std::f32::consts::FRAC_PI_2;

use crate::entities::{Body, Gear, Player, Projectile, ShotFlags, ShotMode, Side, Tint};
use crate::input::InputState;
use crate::tuning::{PLAYER_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};

// ── Tunables ──────────────────────────────────────────────────────────────────

/// Charge stops accumulating after this many held ticks.
pub const CHARGE_CAP: u32 = 120;

/// Minimum ticks between two shot-mode toggles (≈ 300 ms).
pub const TOGGLE_COOLDOWN: u64 = 18;

const SPREAD_SPEED: f32 = 10.0;
const SHOTGUN_SPEED: f32 = 12.0;
const HOMING_SPEED: f32 = 8.0;
const HOMING_MUZZLES: [f32; 2] = [-15.0, 15.0];

const THREE_WAY: [f32; 3] = [0.0, -15.0, 15.0];
const SHOTGUN_FAN: [f32; 9] = [-20.0, -15.0, -10.0, -5.0, 0.0, 5.0, 10.0, 15.0, 20.0];
const TWIN: [f32; 2] = [-10.0, 10.0];

// ── Roster ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Archetype {
    Balance,
    Speed,
    Shotgun,
    Homing,
    Switch,
    Charge,
    Melee,
}

/// Static description of an archetype.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Profile {
    pub name: &'static str,
    pub blurb: &'static str,
    pub move_speed: f32,
    pub shot_interval: u64,
    pub size: f32,
}

impl Archetype {
    /// Selection order on the character-select screen.
    pub const ALL: [Archetype; 7] = [
        Archetype::Balance,
        Archetype::Speed,
        Archetype::Shotgun,
        Archetype::Homing,
        Archetype::Switch,
        Archetype::Charge,
        Archetype::Melee,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&a| a == self).unwrap_or(0)
    }

    pub fn profile(self) -> Profile {
        match self {
            Archetype::Balance => Profile {
                name: "Type A: Balance",
                blurb: "3-way spread, all-rounder",
                move_speed: 5.0,
                shot_interval: 80,
                size: PLAYER_SIZE,
            },
            Archetype::Speed => Profile {
                name: "Type B: Speed",
                blurb: "3-way spread, fast mover",
                move_speed: 8.0,
                shot_interval: 80,
                size: PLAYER_SIZE,
            },
            Archetype::Shotgun => Profile {
                name: "Type C: Shotgun",
                blurb: "9-way burst, slow reload",
                move_speed: 4.0,
                shot_interval: 200,
                size: PLAYER_SIZE,
            },
            Archetype::Homing => Profile {
                name: "Type D: Homing",
                blurb: "talismans aimed at the nearest foe",
                move_speed: 5.0,
                shot_interval: 120,
                size: PLAYER_SIZE,
            },
            Archetype::Switch => Profile {
                name: "Type E: Switch",
                blurb: "toggle 2-way / rapid 1-way",
                move_speed: 5.0,
                shot_interval: ShotMode::Twin.interval(),
                size: PLAYER_SIZE,
            },
            Archetype::Charge => Profile {
                name: "Type F: Charge",
                blurb: "hold to charge piercing shots",
                move_speed: 5.0,
                shot_interval: 80,
                size: PLAYER_SIZE,
            },
            Archetype::Melee => Profile {
                name: "Type G: Melee",
                blurb: "short blades that cut bullets",
                move_speed: 6.0,
                shot_interval: 15,
                size: 40.0,
            },
        }
    }
}

impl ShotMode {
    pub fn interval(self) -> u64 {
        match self {
            ShotMode::Twin => 80,
            ShotMode::Single => 20,
        }
    }

    fn flipped(self) -> Self {
        match self {
            ShotMode::Twin => ShotMode::Single,
            ShotMode::Single => ShotMode::Twin,
        }
    }
}

// ── Player behaviour ──────────────────────────────────────────────────────────

impl Player {
    /// Fresh player at the bottom-centre spawn point.
    pub fn new(archetype: Archetype) -> Self {
        let profile = archetype.profile();
        let gear = match archetype {
            Archetype::Switch => Gear::Switch { mode: ShotMode::Twin, last_toggle: None },
            Archetype::Charge => Gear::Charge { charging: false, charge: 0 },
            _ => Gear::Standard,
        };
        Self {
            body: Body::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 50.0, profile.size, profile.size),
            archetype,
            speed: profile.move_speed,
            shot_interval: profile.shot_interval,
            last_shot: None,
            gear,
        }
    }

    /// Apply directional input, halved while `slow` is held, and keep the
    /// whole box on screen.
    pub fn steer(&mut self, input: &InputState) {
        let speed = if input.slow { self.speed / 2.0 } else { self.speed };
        let (dx, dy) = input.direction();
        let half_w = self.body.width / 2.0;
        let half_h = self.body.height / 2.0;
        self.body.x = (self.body.x + dx * speed).clamp(half_w, SCREEN_WIDTH - half_w);
        self.body.y = (self.body.y + dy * speed).clamp(half_h, SCREEN_HEIGHT - half_h);
    }

    /// Ticks that must pass between shots right now.
    pub fn current_interval(&self) -> u64 {
        match self.gear {
            Gear::Switch { mode, .. } => mode.interval(),
            _ => self.shot_interval,
        }
    }

    pub fn ready_to_fire(&self, now: u64) -> bool {
        match self.last_shot {
            None => true,
            Some(last) => now.saturating_sub(last) > self.current_interval(),
        }
    }

    /// Fire according to the archetype.  `target` is the centre of the
    /// nearest valid enemy, consulted only by the homing archetype.
    pub fn shoot(&mut self, input: &InputState, now: u64, target: Option<(f32, f32)>) -> Vec<Projectile> {
        if let Gear::Charge { .. } = self.gear {
            return self.charge_or_release(input.fire, now);
        }
        if !input.fire || !self.ready_to_fire(now) {
            return Vec::new();
        }
        let shots = self.volley(target);
        self.last_shot = Some(now);
        shots
    }

    /// Flip the Switch archetype's shot mode, debounced.  Returns whether the
    /// mode changed; other archetypes ignore the request.
    pub fn toggle_mode(&mut self, now: u64) -> bool {
        let Gear::Switch { mode, last_toggle } = &mut self.gear else {
            return false;
        };
        if let Some(last) = *last_toggle {
            if now.saturating_sub(last) <= TOGGLE_COOLDOWN {
                return false;
            }
        }
        *mode = mode.flipped();
        *last_toggle = Some(now);
        true
    }

    /// Muzzle: top-centre of the craft.
    fn muzzle(&self) -> (f32, f32) {
        (self.body.x, self.body.top())
    }

    fn volley(&self, target: Option<(f32, f32)>) -> Vec<Projectile> {
        let (x, y) = self.muzzle();
        let plain = ShotFlags::default();
        match self.archetype {
            Archetype::Balance => spread(x, y, &THREE_WAY, SPREAD_SPEED, Tint::Cyan, plain),
            Archetype::Speed => spread(x, y, &THREE_WAY, SPREAD_SPEED, Tint::Salmon, plain),
            Archetype::Shotgun => spread(x, y, &SHOTGUN_FAN, SHOTGUN_SPEED, Tint::Green, plain),
            Archetype::Homing => self.homing_volley(target),
            Archetype::Switch => {
                let angles: &[f32] = match self.gear {
                    Gear::Switch { mode: ShotMode::Single, .. } => &[0.0],
                    _ => &TWIN,
                };
                spread(x, y, angles, SPREAD_SPEED, Tint::Yellow, plain)
            }
            Archetype::Charge => charge_spread(x, y, 0),
            Archetype::Melee => self.melee_burst(),
        }
    }

    /// Two talismans from laterally offset muzzles, each aimed at `target`,
    /// or straight up when there is nothing to aim at.
    fn homing_volley(&self, target: Option<(f32, f32)>) -> Vec<Projectile> {
        let (cx, top) = self.muzzle();
        HOMING_MUZZLES
            .iter()
            .map(|&offset| {
                let mx = cx + offset;
                let angle = match target {
                    Some((tx, ty)) => (ty - top).atan2(tx - mx),
                    None => -FRAC_PI_2,
                };
                Projectile::spawn(
                    mx,
                    top,
                    angle.cos() * HOMING_SPEED,
                    angle.sin() * HOMING_SPEED,
                    Side::Player,
                    Tint::Talisman,
                    ShotFlags { size: Some((10.0, 14.0)), ..ShotFlags::default() },
                )
            })
            .collect()
    }

    /// Centre thrust plus two angled side thrusts, all short-lived blades.
    fn melee_burst(&self) -> Vec<Projectile> {
        let (cx, top) = self.muzzle();
        let blade = |x: f32, y: f32, vx: f32, size: f32, life: u32| {
            Projectile::spawn(
                x,
                y,
                vx,
                -15.0,
                Side::Player,
                Tint::Blade,
                ShotFlags { melee: true, life, size: Some((size, size)), ..ShotFlags::default() },
            )
        };
        vec![
            blade(cx, top, 0.0, 20.0, 15),
            blade(cx - 15.0, top + 10.0, -2.0, 15.0, 10),
            blade(cx + 15.0, top + 10.0, 2.0, 15.0, 10),
        ]
    }

    /// Holding fire accumulates charge; releasing fires whatever was stored
    /// and resets it.
    fn charge_or_release(&mut self, fire_held: bool, now: u64) -> Vec<Projectile> {
        let (x, y) = self.muzzle();
        let Gear::Charge { charging, charge } = &mut self.gear else {
            return Vec::new();
        };
        if fire_held {
            *charging = true;
            *charge = (*charge + 1).min(CHARGE_CAP);
            return Vec::new();
        }
        if !*charging {
            return Vec::new();
        }
        let power = *charge;
        *charging = false;
        *charge = 0;
        self.last_shot = Some(now);
        charge_spread(x, y, power)
    }
}

// ── Patterns ──────────────────────────────────────────────────────────────────

/// Fan of shots; angles are degrees from straight up, positive to the right.
fn spread(x: f32, y: f32, angles: &[f32], speed: f32, tint: Tint, flags: ShotFlags) -> Vec<Projectile> {
    angles
        .iter()
        .map(|deg| {
            let rad = deg.to_radians();
            Projectile::spawn(x, y, rad.sin() * speed, -rad.cos() * speed, Side::Player, tint, flags)
        })
        .collect()
}

/// Piercing 3-way spread whose damage, size and speed grow with `power`.
pub fn charge_spread(x: f32, y: f32, power: u32) -> Vec<Projectile> {
    let size = (10 + power / 4) as f32;
    let flags = ShotFlags {
        damage: 1 + power / 5,
        pierce: true,
        size: Some((size, size)),
        ..ShotFlags::default()
    };
    spread(x, y, &THREE_WAY, (8 + power / 5) as f32, Tint::Charged, flags)
}
