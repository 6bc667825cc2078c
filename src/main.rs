//! boolterm - Terminal Boolean Expression Evaluator
//!
//! An interactive calculator for boolean expressions over two configurable
//! literal characters, with AND, OR, NAND, XOR, NOT and parentheses.
//! Features include a gate truth table, session persistence and CSV export.

use std::io;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use boolterm::application::{App, AppMode};
use boolterm::infrastructure::{init_logging, FileRepository, DEFAULT_SETTINGS_FILE};
use boolterm::presentation::{render_ui, InputHandler};

/// Entry point for the boolterm terminal application.
///
/// Loads settings from `boolterm.json` (or the path given as the first
/// argument), sets up the terminal interface, and runs the main event loop
/// until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup fails or if there are issues
/// with the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = init_logging() {
        eprintln!("logging disabled: {err}");
    }

    let settings_file = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_SETTINGS_FILE.to_string());
    let mut app = match FileRepository::load_settings(&settings_file) {
        Ok(settings) => App::with_settings(settings),
        Err(err) => {
            tracing::warn!(settings_file = %settings_file, %err, "settings not loaded");
            let mut app = App::default();
            app.status_message = Some(format!("Could not read {}: {} (using defaults)", settings_file, err));
            app
        }
    };
    app.settings_file = Some(settings_file);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Handles terminal rendering and keyboard input processing.
/// Continues running until the user presses 'q' on the menu.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if app.mode == AppMode::Normal => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
