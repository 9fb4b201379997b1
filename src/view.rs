//! Read-only picture of a session for the renderer, taken after the tick.

use crate::archetypes::Archetype;
use crate::entities::{EnemyKind, Gear, Rect, ShotMode, Tint};
use crate::session::{Screen, Session};
use crate::world::World;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Appearance {
    Player(Archetype),
    Enemy(EnemyKind),
    Boss,
    Shot(Tint),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub rect: Rect,
    pub appearance: Appearance,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossGauge {
    pub hp: u32,
    pub max_hp: u32,
    pub ratio: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameView {
    pub screen: Screen,
    pub score: u64,
    pub best_score: u64,
    pub selected: Archetype,
    /// Live entities in draw order: enemies, boss, shots, player on top.
    pub sprites: Vec<Sprite>,
    pub boss: Option<BossGauge>,
    /// Points still needed before the next boss; `None` while one is up.
    pub until_boss: Option<u64>,
    pub charge: Option<u32>,
    pub shot_mode: Option<ShotMode>,
}

impl World {
    pub fn sprites(&self) -> Vec<Sprite> {
        let enemies = self
            .enemies
            .iter()
            .filter(|e| e.body.alive)
            .map(|e| Sprite { rect: e.body.rect(), appearance: Appearance::Enemy(e.kind) });
        let boss = self
            .boss
            .iter()
            .map(|b| Sprite { rect: b.body.rect(), appearance: Appearance::Boss });
        let shots = self
            .enemy_shots
            .iter()
            .chain(self.player_shots.iter())
            .filter(|s| s.body.alive)
            .map(|s| Sprite { rect: s.body.rect(), appearance: Appearance::Shot(s.tint) });
        let player = std::iter::once(Sprite {
            rect: self.player.body.rect(),
            appearance: Appearance::Player(self.player.archetype),
        });

        enemies.chain(boss).chain(shots).chain(player).collect()
    }

    pub fn boss_gauge(&self) -> Option<BossGauge> {
        self.boss.as_ref().map(|b| BossGauge { hp: b.hp, max_hp: b.max_hp, ratio: b.hp_ratio() })
    }
}

impl Session {
    pub fn view(&self) -> FrameView {
        let world = self.world.as_ref();
        let gear = world.map(|w| w.player.gear);
        FrameView {
            screen: self.screen(),
            score: self.progress.score,
            best_score: self.best_score,
            selected: self.selected_archetype(),
            sprites: world.map(World::sprites).unwrap_or_default(),
            boss: world.and_then(World::boss_gauge),
            until_boss: match world {
                Some(w) if !w.boss_active() => {
                    Some(self.progress.next_boss_score.saturating_sub(self.progress.score))
                }
                _ => None,
            },
            charge: match gear {
                Some(Gear::Charge { charge, .. }) => Some(charge),
                _ => None,
            },
            shot_mode: match gear {
                Some(Gear::Switch { mode, .. }) => Some(mode),
                _ => None,
            },
        }
    }
}
