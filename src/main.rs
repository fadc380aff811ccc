mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        MouseButton, MouseEvent, MouseEventKind, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::ThreadRng;
use rand::thread_rng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use zombie_survival::compute::{init_state, perform_attack, resize, tick};
use zombie_survival::config::GameConfig;
use zombie_survival::entities::{GameState, HudValues};
use zombie_survival::error::GameError;
use zombie_survival::input::{Action, InputEvent, InputState, Key};
use zombie_survival::loop_driver::FixedTimestep;
use zombie_survival::raster::Raster;
use zombie_survival::render::{self, Assets, C_BACKGROUND};

const CONFIG_ENV_VAR: &str = "ZOMBIE_SURVIVAL_CONFIG";
const LOG_ENV_VAR: &str = "ZOMBIE_SURVIVAL_LOG";

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms at
/// 30 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Lower-cased key name as the input layer expects it.
fn key_name(code: &KeyCode) -> Option<String> {
    match code {
        KeyCode::Up => Some("arrowup".to_string()),
        KeyCode::Down => Some("arrowdown".to_string()),
        KeyCode::Left => Some("arrowleft".to_string()),
        KeyCode::Right => Some("arrowright".to_string()),
        KeyCode::Char(c) => Some(c.to_lowercase().collect()),
        _ => None,
    }
}

/// Drop keys not refreshed within `HOLD_WINDOW` frames and return them.
fn expire_keys(key_frame: &mut HashMap<KeyCode, u64>, frame: u64) -> Vec<KeyCode> {
    let stale: Vec<KeyCode> = key_frame
        .iter()
        .filter(|(_, last)| frame.saturating_sub(**last) > HOLD_WINDOW)
        .map(|(code, _)| *code)
        .collect();
    for code in &stale {
        key_frame.remove(code);
    }
    stale
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Everything one game needs between frames.
struct Session {
    config: GameConfig,
    state: GameState,
    input: InputState,
    hud: HudValues,
    /// Set once the game-over signal fired.
    final_score: Option<u32>,
    raster: Raster,
    cols: u16,
    rows: u16,
}

impl Session {
    fn new(config: GameConfig, cols: u16, rows: u16) -> Self {
        let (width, height) = canvas_size(&config, cols, rows);
        let state = init_state(&config, width, height);
        let input = InputState::with_pointer(state.player.x, state.player.y);
        info!(cols, rows, width, height, "new game");
        Session {
            hud: state.hud(),
            raster: field_raster(cols, rows, width, height),
            config,
            state,
            input,
            final_score: None,
            cols,
            rows,
        }
    }

    fn restart(&mut self) {
        *self = Session::new(self.config.clone(), self.cols, self.rows);
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        let (width, height) = canvas_size(&self.config, cols, rows);
        self.state = resize(&self.state, width, height);
        self.raster = field_raster(cols, rows, width, height);
        self.cols = cols;
        self.rows = rows;
        info!(cols, rows, "terminal resized");
    }

    fn apply(&mut self, event: InputEvent) {
        if let Some(Action::Attack) = self.input.apply(event) {
            self.state = perform_attack(&self.state, &self.config);
        }
    }

    /// Terminal cell to canvas units (cell centre).
    fn cell_to_canvas(&self, column: u16, row: u16) -> (f32, f32) {
        let field_row = row.saturating_sub(display::HUD_ROWS);
        (
            (column as f32 + 0.5) * self.config.display.cell_width,
            (field_row as f32 + 0.5) * self.config.display.cell_height,
        )
    }

    fn run_ticks(&mut self, ticks: u32, rng: &mut ThreadRng) {
        for _ in 0..ticks {
            let outcome = tick(&self.state, &self.input, &self.config, rng);
            self.state = outcome.state;
            self.hud = outcome.hud;
            if outcome.game_over {
                self.final_score = Some(self.state.score);
            }
        }
    }
}

fn canvas_size(config: &GameConfig, cols: u16, rows: u16) -> (f32, f32) {
    let field_rows = rows.saturating_sub(display::HUD_ROWS);
    (
        cols as f32 * config.display.cell_width,
        field_rows as f32 * config.display.cell_height,
    )
}

fn field_raster(cols: u16, rows: u16, width: f32, height: f32) -> Raster {
    let field_rows = rows.saturating_sub(display::HUD_ROWS);
    Raster::new(cols as u32, field_rows as u32 * 2, width, height)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  After game over the frozen final frame
/// keeps being drawn; R starts a new game.
///
/// Input model: key presses are recorded in `key_frame` with the frame they
/// were last seen.  Keys that stop repeating expire after `HOLD_WINDOW`
/// frames, which emulates key-up on terminals without release events.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    assets: &Assets,
    rx: &mpsc::Receiver<Event>,
) -> Result<(), GameError> {
    let mut rng = thread_rng();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut timestep = FixedTimestep::new(&session.config.pacing, Instant::now());
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        let first_press = !key_frame.contains_key(&code);
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') if session.state.is_over => {
                                session.restart();
                                key_frame.clear();
                                continue;
                            }
                            _ => {}
                        }
                        if let Some(key) = key_name(&code).as_deref().and_then(Key::from_name) {
                            // Movement keys only need the first press; every
                            // attack press (and repeat) is a swing attempt.
                            if first_press || key == Key::Attack {
                                session.apply(InputEvent::KeyDown(key));
                            }
                        }
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                        if let Some(key) = key_name(&code).as_deref().and_then(Key::from_name) {
                            session.apply(InputEvent::KeyUp(key));
                        }
                    }
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => {
                    let (x, y) = session.cell_to_canvas(column, row);
                    match kind {
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                            session.apply(InputEvent::PointerMove { x, y });
                        }
                        MouseEventKind::Down(MouseButton::Left) => {
                            session.apply(InputEvent::PointerMove { x, y });
                            session.apply(InputEvent::PointerDown);
                        }
                        MouseEventKind::Up(MouseButton::Left) => {
                            session.apply(InputEvent::PointerUp);
                        }
                        // Right click behaves like a tap on a touch screen.
                        MouseEventKind::Down(MouseButton::Right) => {
                            session.apply(InputEvent::TouchStart { x, y });
                        }
                        _ => {}
                    }
                }
                Event::Resize(cols, rows) => session.resize(cols, rows),
                // Key releases may be missed while unfocused.
                Event::FocusLost => {
                    key_frame.clear();
                    session.input.release_all();
                }
                _ => {}
            }
        }

        for code in expire_keys(&mut key_frame, frame) {
            if let Some(key) = key_name(&code).as_deref().and_then(Key::from_name) {
                session.apply(InputEvent::KeyUp(key));
            }
        }

        // ── Simulate, then draw ───────────────────────────────────────────────
        let ticks = timestep.advance(Instant::now());
        session.run_ticks(ticks, &mut rng);

        session.raster.clear(C_BACKGROUND);
        render::render(&mut session.raster, &session.state, assets);
        display::render(
            out,
            &session.raster,
            &session.hud,
            session.final_score,
            session.cols,
            session.rows,
        )?;

        let pause = timestep.sleep_for(frame_start, Instant::now());
        if !pause.is_zero() {
            thread::sleep(pause);
        }
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

/// The terminal is the display, so logs go to a file.
fn init_logging() -> Result<PathBuf, GameError> {
    let path = std::env::var_os(LOG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("zombie_survival.log"));
    let file = File::create(&path).map_err(|source| GameError::Io {
        path: path.clone(),
        source,
    })?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();
    Ok(path)
}

fn load_config() -> Result<GameConfig, GameError> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => GameConfig::load(&PathBuf::from(path)),
        None => Ok(GameConfig::default()),
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let log_path = init_logging()?;
    let config = load_config()?;
    let assets = Assets::load(&config.display.assets_dir);
    info!(log = %log_path.display(), "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;
    out.execute(EnableFocusChange)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
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

    let result = terminal::size()
        .map_err(GameError::from)
        .and_then(|(cols, rows)| {
            let mut session = Session::new(config, cols, rows);
            game_loop(&mut out, &mut session, &assets, &rx)
        });

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableFocusChange);
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        error!(%err, "exited with error");
    }
    result
}
