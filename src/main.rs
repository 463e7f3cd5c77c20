//! BLOCKFALL - terminal host for the falling-block engine

mod input;
mod settings;
mod ui;

use blockfall::{Clock, Command, Engine, GameEvent, Phase};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use input::{Action, KeyBindings};
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};
use ui::Overlay;

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Final numbers printed after the terminal is restored
struct Summary {
    score: u64,
    rows: u32,
}

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Setup tracing to log file
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("blockfall=debug"));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();
    let mut engine = Engine::new(settings.engine.clone())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let keys = KeyBindings::from_settings(&settings);

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut engine, &keys);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Err(e) = settings.save() {
        eprintln!("Warning: Could not save settings: {}", e);
    }

    match &result {
        Ok(summary) => {
            println!("\nThanks for playing BLOCKFALL!");
            println!("Final Score: {} | Rows: {}", summary.score, summary.rows);
        }
        Err(e) => tracing::error!("Exiting on error: {}", e),
    }

    result.map(|_| ())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    engine: &mut Engine,
    keys: &KeyBindings,
) -> io::Result<Summary> {
    let mut clock = Clock::new(engine.config().gravity(), Instant::now());
    let mut overlay = Overlay::Welcome;

    loop {
        let events = clock
            .advance(engine, Instant::now())
            .map_err(io::Error::other)?;
        for event in events {
            log_event(event);
        }

        // Render
        let snapshot = engine.snapshot();
        terminal.draw(|frame| ui::render_game(frame, &snapshot, engine.rows_cleared(), overlay))?;

        let timeout = clock
            .next_deadline()
            .saturating_duration_since(Instant::now())
            .min(FRAME_DURATION);
        if !event::poll(timeout)? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            break;
        }

        match overlay {
            Overlay::Welcome => {
                overlay = Overlay::None;
                continue;
            }
            Overlay::ConfirmReset => {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => {
                        engine.reset();
                        overlay = Overlay::None;
                    }
                    KeyCode::Char('n') | KeyCode::Esc => {
                        engine.resume();
                        overlay = Overlay::None;
                    }
                    _ => {}
                }
                continue;
            }
            Overlay::None => {}
        }

        // Any key after a loss starts over
        if engine.phase() == Phase::GameOver {
            engine.apply(Command::Reset);
            continue;
        }

        match keys.action_for(key.code) {
            Some(Action::Quit) => break,
            Some(Action::RequestReset) => {
                engine.pause();
                overlay = Overlay::ConfirmReset;
            }
            Some(Action::Game(command)) => {
                engine.apply(command);
            }
            None => {}
        }
    }

    Ok(Summary {
        score: engine.score(),
        rows: engine.rows_cleared(),
    })
}

fn log_event(event: GameEvent) {
    match event {
        GameEvent::RowsCleared(count) => tracing::info!("Cleared {} rows", count),
        GameEvent::ScoreChanged(score) => tracing::debug!("Score is now {}", score),
        GameEvent::GameOver => tracing::info!("Game over"),
        GameEvent::PieceLocked | GameEvent::TimerRequested { .. } => {}
    }
}
