use std::{env, path::PathBuf, time::Duration};

use crate::tuning::MatchTuning;

// Runtime constants (not gameplay tuning).

/// One simulation step per rendered frame, nominally 60 per second.
pub const DEFAULT_FRAME: Duration = Duration::from_millis(16);

pub fn frame_interval() -> Duration {
    env::var("SHOOTER_FRAME_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|&ms| ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_FRAME)
}

/// Fixed RNG seed for reproducible runs; `None` seeds from entropy.
pub fn rng_seed() -> Option<u64> {
    env::var("SHOOTER_SEED").ok().and_then(|v| v.parse().ok())
}

/// Match tuning with environment overrides applied on top of the defaults.
pub fn match_tuning() -> MatchTuning {
    let mut tuning = MatchTuning::default();
    if let Some(chance) = env::var("SHOOTER_SPAWN_CHANCE")
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|c| (0.0..=1.0).contains(c))
    {
        tuning.enemy_spawn_chance = chance;
    }
    tuning
}

pub fn log_path() -> PathBuf {
    env::var_os("SHOOTER_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("danmaku_shooter.log"))
}

pub fn log_json() -> bool {
    matches!(env::var("LOG_FORMAT").as_deref(), Ok("json"))
}
