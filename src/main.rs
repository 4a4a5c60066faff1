mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use platformer::compute::{activate_cheat_code, init_state, restart, tick, Input};
use platformer::config::PlatformerConfig;
use platformer::entities::{GameState, GameStatus};
use platformer::snapshot::{snapshot, status_name, Hud};

#[derive(Parser, Debug)]
#[command(name = "platformer")]
#[command(about = "Side-scrolling platformer/shooter with a procedurally generated world")]
struct Args {
    /// Seed for world generation and enemy behaviour (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Total world width; reaching its end wins
    #[arg(long, default_value_t = 10_000.0)]
    world_width: f32,

    /// Width generated per chunk
    #[arg(long, default_value_t = 800.0)]
    chunk_width: f32,

    /// Lives at the start of a session
    #[arg(long, default_value_t = 3)]
    lives: u32,

    /// Run an autopilot without a terminal and print a JSON summary
    #[arg(long)]
    headless: bool,

    /// Frame limit for --headless
    #[arg(long, default_value_t = 3_600)]
    frames: u64,

    /// Write logs here (the interactive game owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> PlatformerConfig {
        PlatformerConfig {
            world_width: self.world_width,
            chunk_width: self.chunk_width,
            start_lives: self.lives,
            ..PlatformerConfig::default()
        }
    }
}

fn init_tracing(log_file: Option<&Path>, headless: bool) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if headless => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        // Raw-mode terminal with no log file: nowhere sensible to write.
        None => {}
    }
    Ok(())
}

// ── Headless autopilot ────────────────────────────────────────────────────────

/// How far ahead of the player the autopilot looks for ground and enemies.
const LOOKAHEAD: f32 = 40.0;
const ENEMY_ALERT_RANGE: f32 = 120.0;

/// Run right, shoot whenever the gun is ready, and jump over gaps and
/// nearby enemies.
fn autopilot(state: &GameState) -> Input {
    let p = &state.player;
    let ahead = p.x + p.width + LOOKAHEAD;
    let feet = p.y + p.height;

    let ground_ahead = state
        .platforms
        .iter()
        .any(|pl| pl.x <= ahead && ahead <= pl.x + pl.width && pl.y >= feet - 1.0);
    let enemy_ahead = state.enemies.iter().any(|e| {
        e.x > p.x && e.x - p.x < ENEMY_ALERT_RANGE && (e.y + e.height - feet).abs() < 60.0
    });

    Input {
        left: false,
        right: true,
        jump: p.on_ground && (!ground_ahead || enemy_ahead),
        shoot: true,
    }
}

#[derive(Serialize)]
struct RunSummary {
    seed: Option<u64>,
    frame: u64,
    status: &'static str,
    player_x: f32,
    frontier: f32,
    platforms: usize,
    enemies_left: usize,
    hud: Hud,
}

fn run_headless(
    config: PlatformerConfig,
    frames: u64,
    seed: Option<u64>,
    rng: &mut StdRng,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = init_state(config, 0, rng);
    while state.frame < frames && state.status == GameStatus::Playing {
        let input = autopilot(&state);
        tick(&mut state, &input, rng);
    }

    let snap = snapshot(&state);
    let summary = RunSummary {
        seed,
        frame: state.frame,
        status: status_name(state.status),
        player_x: state.player.x,
        frontier: state.frontier,
        platforms: state.platforms.len(),
        enemies_left: state.enemies.len(),
        hud: snap.hud,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

// ── Held keys ─────────────────────────────────────────────────────────────────

/// Frames a movement key stays down after its last press or repeat event.
/// Terminals without release events rely on OS key-repeat refreshing it.
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

// ── Title screen ──────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    high_score: u32,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "▲  CHUNK  RUNNER  ▲";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    // Best score this run (never saved)
    if high_score > 0 {
        let hs_str = format!("Best Score: {}", high_score);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(hs_str.chars().count() as u16 / 2),
            cy.saturating_sub(5),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&hs_str))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Reach the end of the world alive."))?;

    let legend: &[(&str, Color, &str)] = &[
        ("B", Color::Red,         " Basic / F Fast / W Flying — patrol"),
        ("S", Color::Red,         " Shooter — aims at you"),
        ("o", Color::Yellow,      " Coin    — +10 points"),
        ("♥", Color::Magenta,     " Heart   — +40 health"),
    ];
    for (i, (sym, color, desc)) in legend.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(14), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 4))?;
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print("[ENTER] Start     [Q] Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) => match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            },
            Ok(_) => {}
            // Input thread is gone; nothing can ever start a game.
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Play one session.  `Ok(true)` quits the program, `Ok(false)` goes back to
/// the title screen.
///
/// `key_frame` holds the loop frame of each key's latest press or repeat;
/// left/right read it as held keys, jump and shoot trigger on the press
/// itself.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<bool> {
    let frame_time = Duration::from_secs_f64(1.0 / state.config.fps as f64);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut cheat_prompt: Option<String> = None;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut input = Input::default();

        // ── Input ────────────────────────────────────────────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(true);
            }

            // Cheat prompt swallows every key while open
            if let Some(text) = cheat_prompt.as_mut() {
                if kind == KeyEventKind::Release {
                    continue;
                }
                match code {
                    KeyCode::Enter => {
                        let accepted = activate_cheat_code(state, text);
                        info!(accepted, "cheat code submitted");
                        cheat_prompt = None;
                    }
                    KeyCode::Esc => cheat_prompt = None,
                    KeyCode::Backspace => {
                        text.pop();
                    }
                    KeyCode::Char(c) if !c.is_control() => text.push(c),
                    _ => {}
                }
                continue;
            }

            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
                        KeyCode::Esc => return Ok(false),
                        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                            input.jump = true;
                        }
                        KeyCode::Char('f') | KeyCode::Char('F') => input.shoot = true,
                        KeyCode::Char('=') if state.status == GameStatus::Playing => {
                            cheat_prompt = Some(String::new());
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if state.status != GameStatus::Playing =>
                        {
                            *state = restart(state, rng);
                            key_frame.clear();
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

        // ── Simulate (paused while the cheat prompt is open) ─────────────────
        if cheat_prompt.is_none() {
            input.left = any_held(
                &key_frame,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame,
            );
            input.right = any_held(
                &key_frame,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
            );
            tick(state, &input, rng);
        }

        let size = terminal::size()?;
        display::render(out, &snapshot(state), size, cheat_prompt.as_deref())?;

        if let Some(rest) = frame_time.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}

// ── Terminal setup ────────────────────────────────────────────────────────────

/// Raw mode plus alternate screen.  Returns whether the terminal accepted
/// the keyboard enhancement flags (release and repeat events).
fn enter_terminal<W: Write>(out: &mut W) -> std::io::Result<bool> {
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    let enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    Ok(enhanced)
}

/// Best effort: runs on the way out, errors or not.
fn leave_terminal<W: Write>(out: &mut W, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// Blocking `event::read` lives on its own thread; the frame loop only
/// polls the channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });
    rx
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = args.config();
    config.validate()?;
    init_tracing(args.log_file.as_deref(), args.headless)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(seed = ?args.seed, world_width = config.world_width, "starting");

    if args.headless {
        return run_headless(config, args.frames, args.seed, &mut rng);
    }

    let mut out = BufWriter::new(stdout());
    let keyboard_enhanced = enter_terminal(&mut out)?;
    let rx = spawn_input_thread();

    let result = run(&mut out, &rx, config, &mut rng);
    leave_terminal(&mut out, keyboard_enhanced);
    result.map_err(Into::into)
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: PlatformerConfig,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let mut high_score = 0;

    loop {
        match show_menu(out, rx, high_score)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let mut state = init_state(config.clone(), high_score, rng);
                let quit = game_loop(out, &mut state, rx, rng)?;
                high_score = state.high_score.max(state.player.score);

                if quit {
                    break;
                }
            }
        }
    }
    Ok(())
}
