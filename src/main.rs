mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use scroll_shooter::config::GameConfig;
use scroll_shooter::player::InputState;
use scroll_shooter::render::build_frame;
use scroll_shooter::session::{tick, GameSession, Screen};
use scroll_shooter::state::GameStatus;

use display::Projection;

/// A key is considered "held" if its last press/repeat event arrived within
/// this window.  Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is ≥ 15 Hz, so the window is refreshed before it expires.
const HOLD_WINDOW_MS: u64 = 135;

const DEFAULT_CONFIG_PATH: &str = "scroll_shooter.toml";

// ── Command line ──────────────────────────────────────────────────────────────

struct Options {
    config_path: PathBuf,
    seed: Option<u64>,
    /// Run this many ticks without a terminal, then exit.
    headless_ticks: Option<u64>,
}

fn parse_args(args: &[String]) -> Options {
    let mut opts = Options {
        config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        seed: None,
        headless_ticks: None,
    };
    let mut it = args.iter().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => {
                if let Some(path) = it.next() {
                    opts.config_path = PathBuf::from(path);
                }
            }
            "--seed" => opts.seed = it.next().and_then(|s| s.parse().ok()),
            "--headless" => opts.headless_ticks = it.next().and_then(|s| s.parse().ok()),
            other => eprintln!("ignoring unknown argument `{other}`"),
        }
    }
    opts
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            info!("Using RNG seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Returns true if `key` was seen within the last `window` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64, window: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= window)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64, window: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame, window))
}

fn held_input(key_frame: &HashMap<KeyCode, u64>, frame: u64, window: u64) -> InputState {
    let left = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
    let right = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
    let up = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
    let down = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
    InputState {
        left: any_held(key_frame, &left, frame, window),
        right: any_held(key_frame, &right, frame, window),
        up: any_held(key_frame, &up, frame, window),
        down: any_held(key_frame, &down, frame, window),
        fire: is_held(key_frame, &KeyCode::Char(' '), frame, window),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: instead of acting on each key event individually, we keep a
/// `key_frame` map of the frame on which every key was last pressed or
/// repeated, and each frame read the keys that are still "fresh".  This lets
/// Space and a direction be held together.  Terminals with keyboard
/// enhancement also send releases, which drop the key immediately.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let frame_time = Duration::from_millis(1000 / session.config.fps.max(1) as u64);
    let hold_window = (HOLD_WINDOW_MS * session.config.fps as u64 / 1000).max(1);
    let (cols, rows) = terminal::size()?;
    let mut proj = Projection::new(session.viewport, cols, rows);

    let clock = Instant::now();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    while session.running {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                session.quit();
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                session.quit();
                            }
                            KeyCode::Enter if session.screen == Screen::Menu => session.start(),
                            KeyCode::Char('r') | KeyCode::Char('R')
                                if session.status() == GameStatus::GameOver =>
                            {
                                session.restart();
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
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    let (x, y) = proj.to_world(column, row);
                    let action = session.click(x, y);
                    debug!("Click at ({x:.0}, {y:.0}) -> {:?}", action);
                }
                Event::Resize(w, h) => proj = Projection::new(session.viewport, w, h),
                _ => {}
            }
        }

        let now = clock.elapsed().as_millis() as u64;
        let input = held_input(&key_frame, frame, hold_window);
        tick(session, &input, now, rng);
        for sound in session.drain_sounds() {
            debug!("sound: {:?}", sound);
        }

        display::render(out, &build_frame(session, now), &proj)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
    Ok(())
}

// ── Headless run ──────────────────────────────────────────────────────────────

/// Drive the simulation without a terminal: always firing, sweeping left
/// and right.  Time advances by exactly one frame per tick.
fn run_headless(session: &mut GameSession, ticks: u64, rng: &mut StdRng) {
    let frame_ms = 1000 / session.config.fps.max(1) as u64;
    session.start();
    for n in 1..=ticks {
        let heading_left = (n / 90) % 2 == 1;
        let input = InputState {
            left: heading_left,
            right: !heading_left,
            fire: true,
            ..InputState::default()
        };
        let now = n * frame_ms;
        let report = tick(session, &input, now, rng);
        if report.collisions.enemies_rammed > 0 || report.enemies_escaped > 0 {
            debug!("tick {}: {:?}", n, report);
        }
        session.drain_sounds();
        if session.level.is_terminal() {
            break;
        }
    }
    info!(
        "Headless run finished after {} ticks: {:?}, level {}, lives {}, {}/{} kills",
        session.frame,
        session.status(),
        session.level.level,
        session.player.lives,
        session.level.enemies_destroyed,
        session.level.enemies_required
    );
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let opts = parse_args(&args);

    let loaded = GameConfig::load(&opts.config_path);
    let config = loaded.as_ref().cloned().unwrap_or_default();
    if let Err(e) = simple_logging::log_to_file(&config.log_file, config.log_level_filter()) {
        eprintln!("could not open log file {}: {e}", config.log_file);
    }
    info!("Starting scroll_shooter.");
    if let Err(e) = &loaded {
        warn!("{e}; using compiled defaults");
    }

    let mut rng = make_rng(opts.seed);
    let mut session = GameSession::new(config);

    if let Some(ticks) = opts.headless_ticks {
        run_headless(&mut session, ticks, &mut rng);
        return Ok(());
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().map_err(|e| {
        error!("Failed to enable raw mode: {}", e);
        e
    })?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                error!("Failed to read event: {}", e);
                break;
            }
        }
    });

    let result = game_loop(&mut out, &mut session, &rx, &mut rng);
    if let Err(e) = &result {
        error!("Game loop failed: {}", e);
    }

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    info!("Exiting scroll_shooter.");

    result
}
