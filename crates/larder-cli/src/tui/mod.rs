//! Terminal user interface for the weekly planner.
//!
//! ## Entry points
//!
//! - [`run_planner`]: full-screen recipe list with search and the grocery
//!   drawer.

pub mod planner;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use larder_core::store::KeyValueStore;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use tracing::warn;

pub use planner::PlannerApp;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Take over the terminal and run the planner until the user quits.
pub fn run_planner<S: KeyValueStore>(mut app: PlannerApp<S>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // restore the terminal before the panic message is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut PlannerApp<S>,
) -> Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let now = Instant::now();
            if let Err(err) = app.handle_key(key, now) {
                warn!(error = %err, "planner action failed");
                app.set_status(format!("Error: {err:#}"), now);
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
