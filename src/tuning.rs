//! Gameplay tuning: playfield geometry, spawn rates and scoring.
//!
//! Keep this separate from runtime configuration (frame pacing, logging).

// ── Playfield ─────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: f32 = 600.0;
pub const SCREEN_HEIGHT: f32 = 800.0;

/// How far past the screen edge an unbounded projectile may drift before it
/// is culled.
pub const OFFSCREEN_MARGIN: f32 = 50.0;

// ── Default sizes ─────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 30.0;
pub const PLAYER_BULLET_SIZE: f32 = 10.0;
pub const ENEMY_BULLET_SIZE: f32 = 8.0;
pub const ENEMY_SIZE: f32 = 30.0;
pub const BOSS_SIZE: f32 = 60.0;

// ── Match tuning ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchTuning {
    /// Chance per tick that a new enemy appears while no boss is on screen.
    pub enemy_spawn_chance: f64,

    /// Score for shooting down a regular enemy.
    pub kill_score: u64,

    /// Score for every projectile that lands on the boss.
    pub boss_hit_score: u64,

    /// Score for defeating the boss.
    pub boss_defeat_bonus: u64,

    /// Score per enemy swept off the screen when a boss arrives.
    pub boss_sweep_bonus: u64,

    /// Score gap between match start (or a boss defeat) and the next boss.
    pub boss_interval: u64,

    /// Boss hit points are this times the boss level.
    pub boss_hp_per_level: u32,
}

impl Default for MatchTuning {
    fn default() -> Self {
        Self {
            enemy_spawn_chance: 0.03,
            kill_score: 10,
            boss_hit_score: 1,
            boss_defeat_bonus: 1000,
            boss_sweep_bonus: 10,
            boss_interval: 150,
            boss_hp_per_level: 100,
        }
    }
}
