//! Rendering layer (all terminal I/O lives here).
//!
//! Each function receives a mutable writer and a [`FrameView`] taken after the
//! tick.  No game logic is performed; this module only translates the view
//! into terminal commands, scaling the 600×800 playfield into whatever cells
//! the terminal offers.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use danmaku_shooter::archetypes::Archetype;
use danmaku_shooter::entities::{EnemyKind, Rect, ShotMode, Tint};
use danmaku_shooter::session::Screen;
use danmaku_shooter::tuning::{SCREEN_HEIGHT, SCREEN_WIDTH};
use danmaku_shooter::view::{Appearance, BossGauge, FrameView, Sprite};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_BOSS: Color = Color::Magenta;
const C_GAUGE_FULL: Color = Color::Green;
const C_GAUGE_EMPTY: Color = Color::Red;

fn archetype_color(archetype: Archetype) -> Color {
    match archetype {
        Archetype::Balance => Color::Blue,
        Archetype::Speed => Color::Red,
        Archetype::Shotgun => Color::Green,
        Archetype::Homing => Color::White,
        Archetype::Switch => Color::Yellow,
        Archetype::Charge => Color::Cyan,
        Archetype::Melee => Color::DarkYellow,
    }
}

fn glyph(appearance: Appearance) -> (&'static str, Color) {
    match appearance {
        Appearance::Player(a) => ("▲", archetype_color(a)),
        Appearance::Enemy(EnemyKind::Normal) => ("▼", Color::Red),
        Appearance::Enemy(EnemyKind::Wavy) => ("≈", Color::Green),
        Appearance::Enemy(EnemyKind::Shooter) => ("◎", Color::Yellow),
        Appearance::Boss => ("█", C_BOSS),
        Appearance::Shot(Tint::Cyan) => ("║", Color::Cyan),
        Appearance::Shot(Tint::Salmon) => ("║", Color::DarkRed),
        Appearance::Shot(Tint::Green) => ("·", Color::Green),
        Appearance::Shot(Tint::Talisman) => ("▯", Color::White),
        Appearance::Shot(Tint::Yellow) => ("|", Color::Yellow),
        Appearance::Shot(Tint::Charged) => ("◆", Color::Yellow),
        Appearance::Shot(Tint::Blade) => ("/", Color::DarkYellow),
        Appearance::Shot(Tint::EnemyOrb) => ("•", Color::Magenta),
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, view: &FrameView, width: u16, height: u16) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match view.screen {
        Screen::Title => draw_title(out, view, width, height)?,
        Screen::Select => draw_select(out, view, width, height)?,
        Screen::Playing => {
            let field = Field::new(width, height);
            draw_border(out, width, height)?;
            draw_hud(out, view, width)?;
            for sprite in &view.sprites {
                draw_sprite(out, &field, sprite)?;
            }
            draw_controls_hint(out, height)?;
        }
        Screen::GameOver => draw_game_over(out, view, width, height)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Playfield → cell mapping ──────────────────────────────────────────────────

/// Cell area inside the border: columns 1..width-1, rows 2..height-2.
struct Field {
    cols: f32,
    rows: f32,
}

impl Field {
    fn new(width: u16, height: u16) -> Self {
        Self {
            cols: width.saturating_sub(2).max(1) as f32,
            rows: height.saturating_sub(4).max(1) as f32,
        }
    }

    fn col(&self, x: f32) -> i32 {
        1 + (x / SCREEN_WIDTH * self.cols).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        2 + (y / SCREEN_HEIGHT * self.rows).floor() as i32
    }

    fn visible(&self, col: i32, row: i32) -> bool {
        col >= 1 && col <= self.cols as i32 && row >= 2 && row < 2 + self.rows as i32
    }

    /// Cells covered by `rect`, at least the one under its centre.
    fn cells(&self, rect: &Rect) -> Vec<(u16, u16)> {
        let (cx, cy) = rect.center();
        let (c0, c1) = (self.col(rect.left), self.col(rect.right - 0.01).max(self.col(rect.left)));
        let (r0, r1) = (self.row(rect.top), self.row(rect.bottom - 0.01).max(self.row(rect.top)));
        let mut cells: Vec<(u16, u16)> = (r0..=r1)
            .flat_map(|r| (c0..=c1).map(move |c| (c, r)))
            .filter(|&(c, r)| self.visible(c, r))
            .map(|(c, r)| (c as u16, r as u16))
            .collect();
        if cells.is_empty() {
            let (c, r) = (self.col(cx), self.row(cy));
            if self.visible(c, r) {
                cells.push((c as u16, r as u16));
            }
        }
        cells
    }
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &FrameView, width: u16) -> std::io::Result<()> {
    // Score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>7}", view.score)))?;

    // Boss gauge or countdown, centre
    let cx = width / 2;
    match (&view.boss, view.until_boss) {
        (Some(gauge), _) => draw_boss_gauge(out, gauge, cx)?,
        (None, Some(left)) => {
            let text = format!("Boss in {}", left);
            out.queue(cursor::MoveTo(cx.saturating_sub(text.len() as u16 / 2), 0))?;
            out.queue(style::SetForegroundColor(Color::Yellow))?;
            out.queue(Print(text))?;
        }
        (None, None) => {}
    }

    // Archetype state, right
    let right = match (view.charge, view.shot_mode) {
        (Some(charge), _) => format!("Charge {:>3}", charge),
        (_, Some(ShotMode::Twin)) => "Mode 2-WAY".to_string(),
        (_, Some(ShotMode::Single)) => "Mode 1-WAY".to_string(),
        _ => String::new(),
    };
    if !right.is_empty() {
        let rx = width.saturating_sub(right.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(rx, 0))?;
        out.queue(style::SetForegroundColor(archetype_color(view.selected)))?;
        out.queue(Print(&right))?;
    }

    Ok(())
}

fn draw_boss_gauge<W: Write>(out: &mut W, gauge: &BossGauge, cx: u16) -> std::io::Result<()> {
    const BAR: usize = 20;
    let filled = ((gauge.ratio.clamp(0.0, 1.0) * BAR as f32).ceil() as usize).min(BAR);
    let label = format!(" {:>4}", gauge.hp);
    let start = cx.saturating_sub((BAR as u16 + 6) / 2);

    out.queue(cursor::MoveTo(start, 0))?;
    out.queue(style::SetForegroundColor(C_BOSS))?;
    out.queue(Print("["))?;
    out.queue(style::SetForegroundColor(C_GAUGE_FULL))?;
    out.queue(Print("█".repeat(filled)))?;
    out.queue(style::SetForegroundColor(C_GAUGE_EMPTY))?;
    out.queue(Print("░".repeat(BAR - filled)))?;
    out.queue(style::SetForegroundColor(C_BOSS))?;
    out.queue(Print("]"))?;
    out.queue(Print(label))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(out: &mut W, field: &Field, sprite: &Sprite) -> std::io::Result<()> {
    let (symbol, color) = glyph(sprite.appearance);
    out.queue(style::SetForegroundColor(color))?;
    for (col, row) in field.cells(&sprite.rect) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(symbol))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑↓→/WASD Move  C Slow  Z/SPACE Fire  X Mode  Q Quit"))?;
    Ok(())
}

// ── Menu screens ──────────────────────────────────────────────────────────────

fn centered<W: Write>(out: &mut W, width: u16, row: u16, text: &str, color: Color) -> std::io::Result<()> {
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_title<W: Write>(out: &mut W, view: &FrameView, width: u16, height: u16) -> std::io::Result<()> {
    let cy = height / 2;
    centered(out, width, cy.saturating_sub(4), "★  DANMAKU  SHOOTER  ★", Color::Cyan)?;
    if view.best_score > 0 {
        centered(out, width, cy.saturating_sub(2), &format!("Best Score: {}", view.best_score), Color::Yellow)?;
    }
    centered(out, width, cy + 1, "SPACE / ENTER : Next", Color::Yellow)?;
    centered(out, width, cy + 3, "ESC : Quit", Color::White)?;
    Ok(())
}

fn draw_select<W: Write>(out: &mut W, view: &FrameView, width: u16, height: u16) -> std::io::Result<()> {
    let cy = height / 2;
    let profile = view.selected.profile();
    let color = archetype_color(view.selected);

    centered(out, width, cy.saturating_sub(6), "Choose your craft", Color::White)?;
    centered(out, width, cy.saturating_sub(3), "<   ███   >", color)?;
    centered(out, width, cy.saturating_sub(1), profile.name, Color::White)?;
    centered(out, width, cy, profile.blurb, Color::Grey)?;

    let page = format!("{} / {}", view.selected.index() + 1, Archetype::ALL.len());
    centered(out, width, cy + 2, &page, C_HINT)?;
    centered(out, width, cy + 4, "← → change   1-7 pick   Z / SPACE start   ESC back", Color::Yellow)?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, view: &FrameView, width: u16, height: u16) -> std::io::Result<()> {
    let new_best = view.score >= view.best_score && view.score > 0;
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", view.best_score)
    } else {
        format!("Best Score:  {:>6}", view.best_score)
    };

    let lines: [(String, Color); 6] = [
        ("╔════════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER      ║".to_string(), Color::Red),
        ("╚════════════════════╝".to_string(), Color::Red),
        (format!("Final Score: {:>6}", view.score), Color::Yellow),
        (best_line, if new_best { Color::Yellow } else { Color::DarkGrey }),
        ("R - Title  Q - Quit".to_string(), Color::White),
    ];

    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        centered(out, width, start_row + i as u16, msg, *color)?;
    }

    Ok(())
}
