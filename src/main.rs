mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use display::Viewport;
use laser_defense::compute::{init_state, tick, toggle_pause, GameState};
use laser_defense::config::{GameSettings, LevelConfig, Upgrades};
use laser_defense::logging;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Simulated step used by headless runs.
const HEADLESS_STEP_MS: f64 = 1000.0 / 60.0;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Laser Defense: survive the clock and bring down the boss
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level to play
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// JSON level file to use instead of the built-in table
    #[arg(long, value_name = "PATH")]
    level_file: Option<PathBuf>,

    /// JSON file with purchased upgrade levels
    #[arg(long, value_name = "PATH")]
    upgrades: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a terminal UI for at most this many seconds and print
    /// the level result as JSON
    #[arg(long, value_name = "SECONDS")]
    headless: Option<f64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Direction from the currently held arrow / WASD keys.
fn movement_from_keys(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Vec2 {
    let left = any_held(
        key_frame,
        &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
        frame,
    );
    let right = any_held(
        key_frame,
        &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
        frame,
    );
    let up = any_held(
        key_frame,
        &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
        frame,
    );
    let down = any_held(
        key_frame,
        &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
        frame,
    );

    let mut movement = Vec2::ZERO;
    if left {
        movement.x = -1.0;
    }
    if right {
        movement.x = 1.0;
    }
    if up {
        movement.y = -1.0;
    }
    if down {
        movement.y = 1.0;
    }
    movement
}

// ── Level setup ───────────────────────────────────────────────────────────────

fn load_level(args: &Args) -> LevelConfig {
    match &args.level_file {
        Some(path) => LevelConfig::load_or_builtin(path, args.level),
        None => LevelConfig::builtin(args.level),
    }
}

fn load_upgrades(path: Option<&Path>) -> Upgrades {
    let Some(path) = path else {
        return Upgrades::default();
    };
    match Upgrades::load(path) {
        Ok(upgrades) => upgrades,
        Err(err) => {
            log::warn!("{err}; playing without upgrades");
            Upgrades::default()
        }
    }
}

fn new_game(args: &Args) -> GameState {
    init_state(
        args.level,
        load_level(args),
        load_upgrades(args.upgrades.as_deref()),
        GameSettings::default(),
    )
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

// ── Headless run ──────────────────────────────────────────────────────────────

fn run_headless(args: &Args, seconds: f64) -> std::io::Result<()> {
    let mut rng = make_rng(args.seed);
    let mut state = new_game(args);
    let max_frames = (seconds.max(0.0) * 1000.0 / HEADLESS_STEP_MS).ceil() as u64;

    for _ in 0..max_frames {
        if !state.is_playing() {
            break;
        }
        tick(&mut state, Vec2::ZERO, HEADLESS_STEP_MS, &mut rng);
    }

    let out = stdout();
    let mut out = out.lock();
    match &state.result {
        Some(result) => serde_json::to_writer_pretty(&mut out, result)?,
        None => {
            log::info!("level still running after {seconds}s");
            serde_json::to_writer_pretty(
                &mut out,
                &serde_json::json!({
                    "levelId": state.level_id,
                    "finished": false,
                    "remainingTime": state.remaining_time,
                    "coinsEarned": state.coins,
                    "enemiesKilled": state.kills,
                }),
            )?
        }
    }
    writeln!(out)?;
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → restart the level.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame the keys that are still
/// "fresh" (within `HOLD_WINDOW` frames) are combined into one movement
/// vector, so diagonals work by holding two keys.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        })) = rx.try_recv()
        {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => toggle_pause(state),
                        KeyCode::Char('r') | KeyCode::Char('R') if state.is_over() => {
                            return Ok(false);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // Real elapsed time drives the simulation; long stalls are capped so
        // a suspended terminal doesn't skip the whole level.
        let now = Instant::now();
        let delta = (now - last_tick).as_secs_f64() * 1000.0;
        last_tick = now;
        let movement = movement_from_keys(&key_frame, frame);
        tick(state, movement, delta.min(100.0), rng);

        let (width, height) = terminal::size()?;
        display::render(out, state, Viewport { width, height })?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    if let Some(seconds) = args.headless {
        logging::init(args.verbose);
        return run_headless(&args, seconds);
    }
    // The TUI owns the terminal; only log when explicitly asked to.
    if std::env::var_os("RUST_LOG").is_some() {
        logging::init(args.verbose);
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
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
            Err(_) => break,
        }
    });

    let result = run(&mut out, &args, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, args: &Args, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut rng = make_rng(args.seed);
    loop {
        let mut state = new_game(args);
        if game_loop(out, &mut state, &mut rng, rx)? {
            break;
        }
    }
    Ok(())
}
