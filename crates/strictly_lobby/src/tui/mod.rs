//! Terminal UI for the lobby

mod app;
mod ui;

use std::io;

use anyhow::Result;
use crossterm::{
    cursor, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info};

pub use app::{App, AppExit, InputMode};
pub use ui::draw;

use crate::{
    EnvThemeProbe, FilePreferenceStore, FixedThemeProbe, HttpLobbyApi, LobbyApi, LobbyConfig,
    LobbyController, OsThemeProbe, PreferenceStore, ThemeController,
};

/// Runs the lobby TUI until the user quits or enters a game.
pub async fn run_tui(config: &LobbyConfig) -> Result<AppExit> {
    // Log to a file so tracing output does not corrupt the screen.
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,strictly_lobby=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(server_url = %config.server_url(), "Starting Strictly Lobby TUI");

    let api = HttpLobbyApi::new(config.server_url(), config.request_timeout())?;
    let lobby = LobbyController::new(api, config.notice_duration());

    let probe: Box<dyn OsThemeProbe> = match config.os_theme() {
        Some(theme) => Box::new(FixedThemeProbe(*theme)),
        None => Box::new(EnvThemeProbe),
    };
    let store = FilePreferenceStore::new(config.preferences_path());
    let theme = ThemeController::new(store, probe.probe());

    let mut app = App::new(lobby, theme, probe, config.poll_interval());

    enable_raw_mode()?;
    let res = run_in_alternate_screen(&mut app).await;
    // Restore even when entering the alternate screen failed.
    if let Err(e) = restore_terminal() {
        error!(error = ?e, "Failed to restore terminal");
    }

    match &res {
        Ok(exit) => info!(exit = ?exit, "Lobby closed"),
        Err(e) => error!(error = ?e, "Lobby loop error"),
    }
    res
}

async fn run_in_alternate_screen<A, S, P>(app: &mut App<A, S, P>) -> Result<AppExit>
where
    A: LobbyApi + 'static,
    S: PreferenceStore,
    P: OsThemeProbe,
{
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    app.run(&mut terminal).await
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_succeeds_when_alternate_screen_was_never_entered() {
        assert!(restore_terminal().is_ok());
    }
}
