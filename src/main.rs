mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use glam::Vec2;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use display::{cell_to_world, TerminalSurface};
use space_hunter::consts::{GAME_OVER_PAUSE_MS, STARTING_LIVES, TARGET_FPS, WAVE_SIZE};
use space_hunter::entities::{DirectionKeys, FrameInput};
use space_hunter::game::FrameClock;
use space_hunter::sprites::Assets;
use space_hunter::{Game, GameConfig, InputSource};

// ── Command line ──────────────────────────────────────────────────────────────

/// Space Hunter: arrow keys / WASD to move, mouse to aim, left click to fire.
#[derive(Parser, Debug)]
#[command(name = "space_hunter", version, about)]
struct Cli {
    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Target frame rate
    #[arg(long, default_value_t = TARGET_FPS)]
    fps: u32,

    /// Starting lives
    #[arg(long, default_value_t = STARTING_LIVES)]
    lives: u32,

    /// Enemies spawned each time the wave is cleared
    #[arg(long, default_value_t = WAVE_SIZE)]
    wave_size: usize,

    /// Hold after game over, in milliseconds
    #[arg(long, default_value_t = GAME_OVER_PAUSE_MS)]
    pause_ms: u64,

    /// Write logs to this file (filter with RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// The terminal is in raw mode while playing, so logs only go to a file.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so 8 frames (≈133 ms at 60 FPS) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Keyboard + mouse state fed by the reader thread.
///
/// Held keys are tracked by the frame they were last seen on.  Terminals
/// with keyboard enhancement (kitty protocol) report releases and keys drop
/// immediately; classic terminals only repeat presses, so keys expire after
/// `HOLD_WINDOW` frames of silence.
struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    pointer: Vec2,
    quit: bool,
}

impl TerminalInput {
    fn new(rx: mpsc::Receiver<Event>, pointer: Vec2) -> Self {
        Self {
            rx,
            key_frame: HashMap::new(),
            frame: 0,
            pointer,
            quit: false,
        }
    }

    fn is_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| {
            self.key_frame
                .get(key)
                .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
                .unwrap_or(false)
        })
    }

    fn on_key(&mut self, code: KeyCode, kind: KeyEventKind, modifiers: KeyModifiers) {
        match kind {
            KeyEventKind::Press => {
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true
                    }
                    _ => {}
                }
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> std::io::Result<FrameInput> {
        self.frame += 1;
        let mut fire = 0;

        // Drain all pending events (non-blocking)
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => self.on_key(code, kind, modifiers),
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => match kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        self.pointer = cell_to_world(column, row);
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        self.pointer = cell_to_world(column, row);
                        fire += 1;
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        let keys = DirectionKeys {
            left: self.is_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: self.is_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
            up: self.is_held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
            down: self.is_held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
        };

        Ok(FrameInput {
            keys,
            pointer: self.pointer,
            fire,
            quit: self.quit,
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let (cols, rows) = terminal::size().context("cannot read terminal size")?;
    let config = GameConfig {
        starting_lives: cli.lives,
        wave_size: cli.wave_size,
        fps: cli.fps,
        game_over_pause: Duration::from_millis(cli.pause_ms),
        ..GameConfig::for_terminal(cols, rows)
    };
    config.validate().context("invalid game configuration")?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!("Space Hunter starting with seed {seed}");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("cannot enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle("Space Hunter"))?;
    out.execute(EnableMouseCapture)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the game loop never
    // blocks on I/O.
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

    let result = play(&mut out, rx, config, seed, cols, rows);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn play<W: Write>(
    out: &mut W,
    rx: mpsc::Receiver<Event>,
    config: GameConfig,
    seed: u64,
    cols: u16,
    rows: u16,
) -> Result<()> {
    // Aim straight up until the mouse moves
    let pointer = Vec2::new(config.width / 2.0, 0.0);
    let mut input = TerminalInput::new(rx, pointer);
    let mut surface = TerminalSurface::new(out, cols, rows);
    let mut clock = FrameClock::new(config.frame_duration());

    let mut game = Game::new(config, Assets::builtin(), StdRng::seed_from_u64(seed));
    let reason = game
        .run(&mut input, &mut surface, &mut clock)
        .context("game loop failed")?;
    info!(
        "Space Hunter exiting ({:?}), score {}",
        reason,
        game.state().score
    );
    Ok(())
}
