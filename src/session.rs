//! Top-level flow: Title → Select → Playing → GameOver → Title.
//!
//! The session owns the score/boss counters and the world.  A world only
//! exists while playing; it is built on match start and dropped on game over.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::archetypes::Archetype;
use crate::error::SessionError;
use crate::input::InputState;
use crate::tuning::MatchTuning;
use crate::world::{FrameEvent, Progress, World};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Title,
    Select,
    Playing,
    GameOver,
}

/// Discrete menu inputs, already edge-detected by the front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Prev,
    Next,
    Confirm,
    Back,
    Retry,
}

pub struct Session {
    screen: Screen,
    /// Roster index highlighted on the select screen.
    pub selected: usize,
    pub progress: Progress,
    pub world: Option<World>,
    /// Ticks simulated in the current match.
    pub tick: u64,
    /// Best final score this run (kept in memory only).
    pub best_score: u64,
    pub quit_requested: bool,
    tuning: MatchTuning,
    rng: StdRng,
}

impl Session {
    pub fn new(tuning: MatchTuning, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            screen: Screen::Title,
            selected: 0,
            progress: Progress::new(&tuning),
            world: None,
            tick: 0,
            best_score: 0,
            quit_requested: false,
            tuning,
            rng,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected_archetype(&self) -> Archetype {
        Archetype::from_index(self.selected).unwrap_or(Archetype::Balance)
    }

    /// Apply a menu action.  Actions that mean nothing on the current screen
    /// are ignored.
    pub fn handle(&mut self, action: MenuAction) {
        let roster = Archetype::ALL.len();
        match (self.screen, action) {
            (Screen::Title, MenuAction::Confirm) => self.screen = Screen::Select,
            (Screen::Title, MenuAction::Back) => self.quit_requested = true,
            (Screen::Select, MenuAction::Prev) => self.selected = (self.selected + roster - 1) % roster,
            (Screen::Select, MenuAction::Next) => self.selected = (self.selected + 1) % roster,
            (Screen::Select, MenuAction::Confirm) => self.start_match(),
            (Screen::Select, MenuAction::Back) => self.screen = Screen::Title,
            (Screen::GameOver, MenuAction::Retry) => self.screen = Screen::Title,
            _ => {}
        }
    }

    /// Pick an archetype by roster index and start the match straight away.
    pub fn choose(&mut self, index: usize) -> Result<(), SessionError> {
        if self.screen != Screen::Select {
            return Err(SessionError::NotSelecting { actual: self.screen });
        }
        if Archetype::from_index(index).is_none() {
            return Err(SessionError::UnknownArchetype { index, available: Archetype::ALL.len() });
        }
        self.selected = index;
        self.start_match();
        Ok(())
    }

    fn start_match(&mut self) {
        let archetype = self.selected_archetype();
        self.progress = Progress::new(&self.tuning);
        self.world = Some(World::new(archetype, self.tuning));
        self.tick = 0;
        self.screen = Screen::Playing;
        info!(archetype = archetype.profile().name, "match started");
    }

    /// Run one simulation tick.  Does nothing unless a match is in progress.
    pub fn update(&mut self, input: &InputState) -> Vec<FrameEvent> {
        if self.screen != Screen::Playing {
            return Vec::new();
        }
        let Some(world) = self.world.as_mut() else {
            return Vec::new();
        };

        self.tick += 1;
        let events = world.step(input, self.tick, &mut self.progress, &mut self.rng);

        for event in &events {
            match *event {
                FrameEvent::BossArrived { level, swept } => {
                    info!(level, swept, score = self.progress.score, "boss arrived");
                }
                FrameEvent::BossDefeated { level } => {
                    info!(level, score = self.progress.score, next = self.progress.next_boss_score, "boss defeated");
                }
                FrameEvent::PlayerDown => self.end_match(),
                FrameEvent::EnemyKilled { .. } | FrameEvent::BossDamaged { .. } => {}
            }
        }
        events
    }

    fn end_match(&mut self) {
        self.world = None;
        self.best_score = self.best_score.max(self.progress.score);
        self.screen = Screen::GameOver;
        info!(score = self.progress.score, ticks = self.tick, "game over");
    }
}
