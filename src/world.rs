//! The playing field: owns every live entity and advances them one tick at a
//! time.
//!
//! Entities are never removed mid-tick.  Collision passes only clear the
//! `alive` flag; [`World::step`] compacts the collections once at the end, so
//! no pass can invalidate another pass's iteration.

use rand::Rng;

use crate::archetypes::Archetype;
use crate::entities::{Boss, Enemy, EnemyKind, Player, Projectile};
use crate::input::InputState;
use crate::tuning::MatchTuning;

/// Score and boss progression for the current match.  Owned by the session,
/// mutated by the world while it resolves a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub score: u64,
    /// Level of the next (or current) boss.
    pub boss_level: u32,
    /// Score at which the next boss arrives.
    pub next_boss_score: u64,
}

impl Progress {
    pub fn new(tuning: &MatchTuning) -> Self {
        Self { score: 0, boss_level: 1, next_boss_score: tuning.boss_interval }
    }
}

/// Something noteworthy that happened during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameEvent {
    EnemyKilled { kind: EnemyKind },
    BossArrived { level: u32, swept: u64 },
    BossDamaged { damage: u32, hp: u32 },
    BossDefeated { level: u32 },
    PlayerDown,
}

#[derive(Clone, Debug)]
pub struct World {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_shots: Vec<Projectile>,
    pub enemy_shots: Vec<Projectile>,
    pub boss: Option<Boss>,
    pub tuning: MatchTuning,
}

impl World {
    pub fn new(archetype: Archetype, tuning: MatchTuning) -> Self {
        Self {
            player: Player::new(archetype),
            enemies: Vec::new(),
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            boss: None,
            tuning,
        }
    }

    pub fn boss_active(&self) -> bool {
        self.boss.is_some()
    }

    /// Advance the simulation by one tick.  All randomness comes through
    /// `rng` so callers control determinism.
    ///
    /// Order is fixed: movement and firing, enemy spawn, enemy hits, melee
    /// erasure, boss hits, player hit, boss trigger.  A player hit ends the
    /// tick early; nothing after it runs.
    pub fn step(
        &mut self,
        input: &InputState,
        now: u64,
        progress: &mut Progress,
        rng: &mut impl Rng,
    ) -> Vec<FrameEvent> {
        let mut events = Vec::new();

        self.advance(input, now);
        self.maybe_spawn_enemy(rng);
        self.resolve_enemy_hits(progress, &mut events);
        self.resolve_melee_erasure();
        self.resolve_boss_hits(progress, &mut events);

        if self.player_hit() {
            events.push(FrameEvent::PlayerDown);
            self.reap();
            return events;
        }

        self.check_boss_trigger(progress, &mut events);
        self.reap();
        events
    }

    /// Centre of the closest on-screen enemy (or the boss) to the player,
    /// by squared distance.
    pub fn nearest_target(&self) -> Option<(f32, f32)> {
        let (px, py) = self.player.body.center();
        let dist_sq = |(x, y): (f32, f32)| (x - px) * (x - px) + (y - py) * (y - py);

        let enemies = self
            .enemies
            .iter()
            .filter(|e| e.body.alive && e.body.top() >= 0.0)
            .map(|e| e.body.center());
        let boss = self
            .boss
            .iter()
            .filter(|b| b.body.alive)
            .map(|b| b.body.center());

        enemies
            .chain(boss)
            .fold(None, |best: Option<((f32, f32), f32)>, c| {
                let d = dist_sq(c);
                match best {
                    Some((_, best_d)) if best_d <= d => best,
                    _ => Some((c, d)),
                }
            })
            .map(|(c, _)| c)
    }

    // ── 1. Motion and firing ──────────────────────────────────────────────────

    fn advance(&mut self, input: &InputState, now: u64) {
        self.player.steer(input);
        let target = match self.player.archetype {
            Archetype::Homing => self.nearest_target(),
            _ => None,
        };
        let volley = self.player.shoot(input, now, target);
        self.player_shots.extend(volley);
        if input.toggle && self.player.toggle_mode(now) {
            tracing::debug!(gear = ?self.player.gear, "shot mode toggled");
        }

        let player_pos = self.player.body.center();
        for enemy in &mut self.enemies {
            if let Some(shot) = enemy.advance(player_pos) {
                self.enemy_shots.push(shot);
            }
        }
        if let Some(boss) = self.boss.as_mut() {
            self.enemy_shots.extend(boss.advance());
        }

        for shot in self.player_shots.iter_mut().chain(self.enemy_shots.iter_mut()) {
            shot.advance();
        }
    }

    // ── 2. Enemy spawn ────────────────────────────────────────────────────────

    fn maybe_spawn_enemy(&mut self, rng: &mut impl Rng) {
        if self.boss_active() {
            return;
        }
        if rng.gen::<f64>() < self.tuning.enemy_spawn_chance {
            self.enemies.push(Enemy::spawn(rng));
        }
    }

    // ── 3. Enemies vs player shots ────────────────────────────────────────────

    /// Each enemy touched by any live player shot dies once.  Non-piercing
    /// shots are consumed on their first enemy, so they cannot reach a second
    /// one later in iteration order.
    fn resolve_enemy_hits(&mut self, progress: &mut Progress, events: &mut Vec<FrameEvent>) {
        let kill_score = self.tuning.kill_score;
        for enemy in self.enemies.iter_mut().filter(|e| e.body.alive) {
            let mut hit = false;
            for shot in self.player_shots.iter_mut() {
                if !enemy.body.overlaps(&shot.body) {
                    continue;
                }
                hit = true;
                if !shot.pierce {
                    shot.body.kill();
                }
            }
            if hit {
                enemy.body.kill();
                progress.score += kill_score;
                events.push(FrameEvent::EnemyKilled { kind: enemy.kind });
            }
        }
    }

    // ── 4. Melee blades vs enemy shots ────────────────────────────────────────

    fn resolve_melee_erasure(&mut self) {
        for blade in self.player_shots.iter().filter(|s| s.melee && s.body.alive) {
            for orb in self.enemy_shots.iter_mut() {
                if blade.body.overlaps(&orb.body) {
                    orb.body.kill();
                }
            }
        }
    }

    // ── 5. Boss vs player shots ───────────────────────────────────────────────

    /// Every touching shot is consumed, piercing or not.  The boss leaves the
    /// moment its hit points reach zero; shots after that are left alone.
    fn resolve_boss_hits(&mut self, progress: &mut Progress, events: &mut Vec<FrameEvent>) {
        let Some(boss) = self.boss.as_mut() else {
            return;
        };

        let mut defeated = false;
        for shot in self.player_shots.iter_mut() {
            if !boss.body.overlaps(&shot.body) {
                continue;
            }
            shot.body.kill();
            progress.score += self.tuning.boss_hit_score;
            defeated = boss.take_hit(shot.damage);
            events.push(FrameEvent::BossDamaged { damage: shot.damage, hp: boss.hp });
            if defeated {
                break;
            }
        }

        if defeated {
            let level = boss.level;
            self.boss = None;
            progress.score += self.tuning.boss_defeat_bonus;
            progress.boss_level += 1;
            progress.next_boss_score = progress.score + self.tuning.boss_interval;
            events.push(FrameEvent::BossDefeated { level });
        }
    }

    // ── 6. Player vs anything hostile ─────────────────────────────────────────

    fn player_hit(&self) -> bool {
        let body = &self.player.body;
        self.enemies.iter().any(|e| body.overlaps(&e.body))
            || self.enemy_shots.iter().any(|s| body.overlaps(&s.body))
            || self.boss.as_ref().is_some_and(|b| body.overlaps(&b.body))
    }

    // ── 7. Boss arrival ───────────────────────────────────────────────────────

    /// Once the score reaches the threshold with no boss around, the boss
    /// arrives and sweeps every live enemy off the screen for a bonus.
    fn check_boss_trigger(&mut self, progress: &mut Progress, events: &mut Vec<FrameEvent>) {
        if self.boss_active() || progress.score < progress.next_boss_score {
            return;
        }
        let mut swept = 0u64;
        for enemy in self.enemies.iter_mut().filter(|e| e.body.alive) {
            enemy.body.kill();
            swept += 1;
        }
        progress.score += swept * self.tuning.boss_sweep_bonus;
        self.boss = Some(Boss::new(progress.boss_level, self.tuning.boss_hp_per_level));
        events.push(FrameEvent::BossArrived { level: progress.boss_level, swept });
    }

    // ── End of tick ───────────────────────────────────────────────────────────

    fn reap(&mut self) {
        self.enemies.retain(|e| e.body.alive);
        self.player_shots.retain(|s| s.body.alive);
        self.enemy_shots.retain(|s| s.body.alive);
    }
}
