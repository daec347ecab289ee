//! Terminal UI.

mod app;
mod input;
mod ui;

pub use app::App;
pub use input::{Command, command_for_key, hit_test, move_cursor};
pub use ui::{BoardLayout, draw};

use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use tokio::time::Duration;
use tracing::{error, info, instrument};

use crate::config::ClientConfig;
use crate::controller::TurnController;
use crate::resolver::{HttpResolver, Resolver};

/// Runs the client against the configured resolver until the user quits.
#[instrument(skip_all, fields(server_url = %config.server_url()))]
pub async fn run_tui(config: &ClientConfig) -> Result<()> {
    let resolver = HttpResolver::new(config)?;
    let mut app = App::new(TurnController::new(resolver));

    info!("Starting terminal UI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "UI loop error");
    }
    info!("Terminal UI stopped");
    res
}

/// Event loop: apply arrived replies, redraw, then wait briefly for input.
#[instrument(skip_all)]
pub async fn run_app<B, R>(terminal: &mut Terminal<B>, app: &mut App<R>) -> Result<()>
where
    B: Backend,
    <B as Backend>::Error: Send + Sync + 'static,
    R: Resolver + 'static,
{
    while !app.should_quit() {
        app.drain_replies();
        terminal.draw(|f| app.draw(f))?;

        if event::poll(Duration::from_millis(50))? {
            app.handle_event(event::read()?);
        }

        tokio::task::yield_now().await;
    }
    Ok(())
}
