//! Terminal User Interface module for jot.
//!
//! Provides a three-panel TUI with search input, note list, and detail view
//! using ratatui for rendering and crossterm for terminal management.

use std::io;
use std::panic;
use std::sync::mpsc::Receiver;

use anyhow::{Context, Result};
use crossterm::{
    event::{self as crossterm_event, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::models::Note;
use crate::service::NoteService;
use crate::weather::{WeatherClientBuilder, WeatherProvider};

mod app;
pub mod event;
mod ui;

pub use app::{App, Editor, EditorField, Focus, Mode};
pub use event::Action;

/// Environment variable holding the latitude used for weather lookups.
pub const WEATHER_LAT_VAR: &str = "JOT_WEATHER_LAT";
/// Environment variable holding the longitude used for weather lookups.
pub const WEATHER_LON_VAR: &str = "JOT_WEATHER_LON";

/// Initializes the terminal for TUI rendering.
///
/// Enables raw mode and enters the alternate screen.
/// Returns a configured Terminal instance.
///
/// # Errors
///
/// Returns an error if terminal initialization fails.
fn init_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// Disables raw mode and leaves the alternate screen.
/// This should always be called before exiting the TUI,
/// even in error cases, to prevent terminal corruption.
///
/// # Errors
///
/// Returns an error if terminal restoration fails.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

/// Minimal terminal restoration for panic handler.
///
/// Does not require a Terminal reference, making it safe to call
/// from a panic hook where we may not have access to the Terminal.
/// Ignores errors since we're likely already in a bad state.
fn restore_terminal_panic() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Initializes a panic hook that restores the terminal before panicking.
///
/// This ensures the terminal is restored even if a panic occurs anywhere
/// in the application, not just in the event loop. The original panic
/// hook is preserved and called after terminal restoration.
fn init_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_panic();
        original_hook(panic_info);
    }));
}

/// Executes a side effect requested by the key handler.
///
/// Returns `true` when the application should exit. Store mutations go
/// through the service; the resulting snapshot arrives via the change
/// subscription and is applied by the caller.
fn apply_action(
    app: &mut App,
    service: &NoteService,
    weather: &dyn WeatherProvider,
    action: Action,
) -> Result<bool> {
    match action {
        Action::Quit => return Ok(true),
        Action::CreateNote => {
            let note = service.create_note().context("failed to create note")?;
            app.open_editor(&note);
        }
        Action::SaveNote { id, title, content } => {
            service
                .update_note(id, &title, &content)
                .context("failed to save note")?;
            app.set_status(format!("Saved note {id}"));
        }
        Action::DeleteNote(id) => {
            service.delete_note(id).context("failed to delete note")?;
            app.set_status(format!("Deleted note {id}"));
        }
        Action::FetchWeather => match weather_coordinates() {
            Some((lat, lon)) => match weather.current_temperature(lat, lon) {
                Ok(temp) => app.set_status(format!("Current temperature: {temp} C")),
                Err(e) => app.set_status(format!("Weather unavailable: {e}")),
            },
            None => app.set_status(format!(
                "Set {WEATHER_LAT_VAR} and {WEATHER_LON_VAR} for weather lookups"
            )),
        },
    }
    Ok(false)
}

/// Reads the configured weather coordinates from the environment.
///
/// Returns None when either variable is missing or not a number.
fn weather_coordinates() -> Option<(f64, f64)> {
    let lat = std::env::var(WEATHER_LAT_VAR).ok()?.parse().ok()?;
    let lon = std::env::var(WEATHER_LON_VAR).ok()?.parse().ok()?;
    Some((lat, lon))
}

/// Drains the change subscription, applying the newest snapshot if any
/// mutation was published since the last tick.
fn drain_changes(app: &mut App, changes: &Receiver<Vec<Note>>) {
    let mut latest = None;
    while let Ok(snapshot) = changes.try_recv() {
        latest = Some(snapshot);
    }
    if let Some(snapshot) = latest {
        app.set_notes(snapshot);
    }
}

/// Runs the main event loop for the TUI.
///
/// Polls for keyboard events, updates app state, and re-renders.
/// Exits when the user quits or an error occurs.
///
/// # Errors
///
/// Returns an error if event polling, rendering, or a store operation fails.
/// Terminal state is always restored, even on error.
pub fn run_event_loop(
    app: &mut App,
    service: &NoteService,
    weather: &dyn WeatherProvider,
) -> Result<()> {
    let mut terminal = init_terminal()?;

    let result = run_event_loop_internal(app, service, weather, &mut terminal);

    // Always restore terminal state
    if let Err(e) = restore_terminal(&mut terminal) {
        eprintln!("Error restoring terminal: {e}");
    }

    result
}

/// Internal event loop implementation.
///
/// Separated from `run_event_loop` to ensure terminal restoration happens
/// in the outer function.
fn run_event_loop_internal(
    app: &mut App,
    service: &NoteService,
    weather: &dyn WeatherProvider,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let changes = service.subscribe();

    loop {
        drain_changes(app, &changes);

        terminal.draw(|frame| {
            ui::draw(frame, app);
        })?;

        if crossterm_event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = crossterm_event::read()?
            && let Some(action) = event::handle_key_event(app, key)
            && apply_action(app, service, weather, action)?
        {
            break;
        }
    }

    Ok(())
}

/// Loads the full store snapshot into the App.
///
/// # Errors
///
/// Returns an error if note loading fails.
fn load_notes(app: &mut App, service: &NoteService) -> Result<()> {
    let notes = service.list_notes().context("Failed to load notes")?;
    app.set_notes(notes);
    Ok(())
}

/// Entry point for the TUI application.
///
/// Initializes the database connection, loads notes, and starts the event
/// loop. Runs against the given service so the CLI decides where the
/// database lives.
///
/// # Errors
///
/// Returns an error if:
/// - Note loading fails
/// - Weather client construction fails
/// - Terminal initialization or event loop fails
pub fn run(service: &NoteService) -> Result<()> {
    // Install panic hook to restore terminal on panic
    init_panic_hook();

    let weather = WeatherClientBuilder::new()
        .build()
        .context("Failed to build weather client")?;

    let mut app = App::new();
    load_notes(&mut app, service).context("Failed to load notes from database")?;

    run_event_loop(&mut app, service, &weather).context("TUI event loop failed")?;

    Ok(())
}
