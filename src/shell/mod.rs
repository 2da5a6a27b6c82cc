//! Terminal UI
//!
//! A single-threaded loop: draw, wait for a key or the next due alarm,
//! hand whichever came first to the [`App`].

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use thiserror::Error;
use web_time::{Duration, Instant};

mod app;
mod draw;
mod icon_view;

pub use app::App;

/// How long to wait for input when no alarm is pending
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Errors that end the program
#[derive(Error, Debug)]
pub enum Error {
    #[error("terminal: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Settings(#[from] icon_quiz::settings::Error),
    #[error(transparent)]
    Catalog(#[from] icon_quiz::catalog::Error),
    #[error("log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// Takes over the terminal until the player quits
pub fn run(mut app: App) -> Result<(), Error> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App) -> Result<(), Error> {
    while !app.should_quit() {
        terminal.draw(|frame| draw::draw(frame, app))?;

        let timeout = app
            .next_alarm_due()
            .map_or(IDLE_POLL, |due| due.saturating_duration_since(Instant::now()));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        app.fire_due_alarms(Instant::now());
    }
    Ok(())
}
