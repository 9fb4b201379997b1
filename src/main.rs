mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::{debug, info, warn};

use danmaku_shooter::config;
use danmaku_shooter::input::InputState;
use danmaku_shooter::session::{MenuAction, Screen, Session};

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Frames a key stays held after its last press or repeat.  Terminals without
/// release events only refresh held keys through OS auto-repeat (15 Hz or
/// faster), which lands well inside 8 frames.
const HOLD_WINDOW: u64 = 8;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Decode the held keys into this tick's control snapshot.  Shift+WASD
/// arrives as upper-case letters, which doubles as the slow modifier.
fn input_snapshot(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> InputState {
    use KeyCode::{Char, Down, Left, Right, Up};
    InputState {
        left: any_held(key_frame, &[Left, Char('a'), Char('A')], frame),
        right: any_held(key_frame, &[Right, Char('d'), Char('D')], frame),
        up: any_held(key_frame, &[Up, Char('w'), Char('W')], frame),
        down: any_held(key_frame, &[Down, Char('s'), Char('S')], frame),
        slow: any_held(
            key_frame,
            &[Char('c'), Char('C'), Char('A'), Char('D'), Char('W'), Char('S')],
            frame,
        ),
        fire: any_held(key_frame, &[Char('z'), Char('Z'), Char(' ')], frame),
        toggle: any_held(key_frame, &[Char('x'), Char('X')], frame),
    }
}

/// One-shot menu meaning of a key press, if any.
fn menu_action(code: KeyCode) -> Option<MenuAction> {
    match code {
        KeyCode::Left => Some(MenuAction::Prev),
        KeyCode::Right => Some(MenuAction::Next),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('z') => Some(MenuAction::Confirm),
        KeyCode::Esc => Some(MenuAction::Back),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(MenuAction::Retry),
        _ => None,
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode, so logs go to a file instead of stderr.
fn init_tracing() {
    let path = config::log_path();
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(_) => return, // no log file, no logging
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));
    if config::log_json() {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

// ── Main loop ─────────────────────────────────────────────────────────────────

/// Frame loop; returns when the player quits.
///
/// `key_frame` remembers the frame each key was last pressed or repeated on,
/// and the live keys become one [`InputState`] per simulation tick.  Keys are
/// dropped on release where the terminal reports it, otherwise they lapse
/// after [`HOLD_WINDOW`].  Menus only react to fresh presses.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, session: &mut Session) -> std::io::Result<()> {
    let frame_time = config::frame_interval();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // Pending key events, without blocking.
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char(d @ '1'..='9') if session.screen() == Screen::Select => {
                            let index = d as usize - '1' as usize;
                            if let Err(err) = session.choose(index) {
                                debug!(%err, "selection rejected");
                            }
                        }
                        _ if session.screen() != Screen::Playing => {
                            if let Some(action) = menu_action(code) {
                                session.handle(action);
                            }
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        if session.quit_requested {
            return Ok(());
        }

        if session.screen() == Screen::Playing {
            let input = input_snapshot(&key_frame, frame);
            session.update(&input);
        }

        let (width, height) = terminal::size()?;
        display::render(out, &session.view(), width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_tracing();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events need the kitty keyboard protocol; without it the hold
    // window takes over.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !keyboard_enhanced {
        warn!("terminal lacks key-release events; falling back to hold window");
    }

    // Blocking reads live on their own thread; the loop drains the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let mut session = Session::new(config::match_tuning(), config::rng_seed());
    info!(frame_ms = config::frame_interval().as_millis() as u64, "starting");
    let result = run(&mut out, &rx, &mut session);

    // Restore the terminal even when the loop failed.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(best_score = session.best_score, "exiting");
    result
}
