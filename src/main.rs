//! TETRS remix - terminal host
//!
//! Menus, key sampling and drawing. All game rules live in the library.

mod input;
mod menu;
mod ui;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use input::{Command, InputSampler};
use menu::{Menu, MenuAction};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};
use tetrs_remix::{Difficulty, GameSession, Settings};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Input delay after game over to prevent accidental menu return
const GAME_OVER_INPUT_DELAY: Duration = Duration::from_secs(2);

/// Application state
enum AppState {
    Menu(Menu),
    Playing(Box<Round>),
}

/// A round in progress plus its frame clock
struct Round {
    session: GameSession,
    input: InputSampler,
    last_frame: Instant,
    game_over_at: Option<Instant>,
}

impl Round {
    fn start(difficulty: Difficulty, settings: &Settings) -> Self {
        let mut session = match settings.gameplay.seed {
            Some(seed) => GameSession::with_seed(difficulty, seed),
            None => GameSession::new(difficulty),
        };
        session.set_ai_enabled(settings.gameplay.ai_enabled);
        Self {
            session,
            input: InputSampler::new(),
            last_frame: Instant::now(),
            game_over_at: None,
        }
    }

    /// Feed the time since the last frame and the sampled keys to the session
    fn advance(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let inputs = self.input.sample();
        let report = self.session.tick(dt, inputs);
        if report.landing.is_some() && self.session.is_game_over() {
            self.game_over_at = Some(now);
        }
    }
}

/// Get the temp directory used for logs, creating it if needed
fn temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("tetrs-remix");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    let session_id: u32 = rand::random();

    // Log to a file: the terminal belongs to the UI
    let log_dir = temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tetrs_remix=debug"));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "TETRS remix starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let mut settings = Settings::load();

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Err(e) = settings.save() {
        tracing::warn!("could not save settings: {}", e);
        eprintln!("Warning: Could not save settings: {}", e);
    }

    if let Ok(Some(score)) = &result {
        println!("\nThanks for playing TETRS remix!");
        println!("Final Score: {}", score);
    }

    result.map(|_| ())
}

/// Run menus and rounds until the player quits. Returns the last round's score.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &mut Settings,
) -> io::Result<Option<u32>> {
    let mut state = AppState::Menu(Menu::main_menu(settings.gameplay.difficulty));
    let mut last_score: Option<u32> = None;

    loop {
        terminal.draw(|frame| match &state {
            AppState::Menu(menu) => ui::render_menu(frame, menu),
            AppState::Playing(round) => {
                ui::render_game(frame, &round.session.snapshot(), settings)
            }
        })?;

        if event::poll(FRAME_DURATION)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };

            if key.kind == KeyEventKind::Release {
                if let AppState::Playing(round) = &mut state {
                    round.input.key_up(key);
                }
                continue;
            }

            let difficulty = settings.gameplay.difficulty;
            match &mut state {
                AppState::Menu(menu) => match key.code {
                    KeyCode::Up => menu.move_up(),
                    KeyCode::Down => menu.move_down(),
                    KeyCode::Esc => menu.go_back(difficulty),
                    KeyCode::Char('q') => return Ok(last_score),
                    KeyCode::Enter => match menu.select() {
                        Some(MenuAction::StartGame(chosen)) => {
                            settings.gameplay.difficulty = chosen;
                            state = AppState::Playing(Box::new(Round::start(chosen, settings)));
                        }
                        Some(MenuAction::GoToScreen(screen)) => menu.go_to(screen, difficulty),
                        Some(MenuAction::Back) => menu.go_back(difficulty),
                        Some(MenuAction::Quit) => return Ok(last_score),
                        None => {}
                    },
                    _ => {}
                },
                AppState::Playing(round) => {
                    if let Some(at) = round.game_over_at {
                        if at.elapsed() >= GAME_OVER_INPUT_DELAY {
                            last_score = Some(round.session.score().points);
                            state = AppState::Menu(Menu::main_menu(difficulty));
                        }
                        continue;
                    }
                    match round.input.key_down(key) {
                        Some(Command::Menu) => {
                            last_score = Some(round.session.score().points);
                            state = AppState::Menu(Menu::main_menu(difficulty));
                        }
                        Some(Command::Quit) => {
                            return Ok(Some(round.session.score().points));
                        }
                        None => {}
                    }
                }
            }
        }

        if let AppState::Playing(round) = &mut state {
            round.advance();
        }
    }
}
