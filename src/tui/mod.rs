//! Terminal UI for tic-tac-toe with time travel.
//!
//! Single-threaded cooperative event loop: each user intent (key
//! press) is handled synchronously to completion before the next is
//! read, so the core never sees concurrent mutation.

mod app;
mod input;
mod ui;

pub use app::App;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing::{debug, error, info};

/// Path the 'd' key writes the session debug dump to.
const DUMP_PATH: &str = "session_dump.json";

/// Runs the TUI until the user quits.
pub fn run() -> Result<()> {
    info!("Starting tic-tac-toe TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new();
    let res = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }

    res
}

fn run_loop<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    info!("User quit");
                    return Ok(());
                }
                KeyCode::Enter | KeyCode::Char(' ') => app.place_at_cursor(),
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    if let Some(digit) = c.to_digit(10) {
                        app.place_digit(digit);
                    }
                }
                KeyCode::Char(',') => app.step_back(),
                KeyCode::Char('.') => app.step_forward(),
                KeyCode::Char('m') => app.toggle_moves(),
                KeyCode::Char('n') => app.new_match(),
                KeyCode::Char('s') => app.reset_scores(),
                KeyCode::Char('d') => app.dump_session(DUMP_PATH),
                code @ (KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right) => {
                    app.set_cursor(input::move_cursor(app.cursor(), code));
                }
                code => debug!(?code, "Unbound key"),
            }
        }
    }
}
