//! Strictly Lobby - terminal lobby client
//!
//! Browse, create, join and enter games on a strictly_games server.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, ThemeChoice};
use strictly_lobby::{
    AppExit, EnvThemeProbe, FilePreferenceStore, HttpLobbyApi, LobbyConfig, LobbyController,
    OsThemeProbe, Theme, ThemeController, run_tui,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = LobbyConfig::load_or_default(&cli.config)?;
    if let Some(server_url) = cli.server_url {
        config = config.with_server_url(server_url);
    }

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => run_lobby(&config).await,
        Command::List => {
            initialize_stderr_tracing();
            run_list(&config).await
        }
        Command::Theme { choice } => {
            initialize_stderr_tracing();
            run_theme(&config, choice)
        }
    }
}

/// Run the lobby TUI and report where the user went.
async fn run_lobby(config: &LobbyConfig) -> Result<()> {
    match run_tui(config).await? {
        AppExit::Quit => {}
        AppExit::EnterGame(navigation) => {
            let target = reqwest::Url::parse(config.server_url())
                .ok()
                .and_then(|base| navigation.url(&base));
            match target {
                Some(url) => println!("Entering game: {}", url),
                None => println!("Entering game: {}", navigation.path()),
            }
        }
    }
    Ok(())
}

/// Load both lobby views once and print them.
#[instrument(skip(config), fields(server_url = %config.server_url()))]
async fn run_list(config: &LobbyConfig) -> Result<()> {
    let api = HttpLobbyApi::new(config.server_url(), config.request_timeout())?;
    let mut lobby = LobbyController::new(api, config.notice_duration());
    lobby.mount().await;

    match lobby.current_game_view() {
        Some(row) => println!("{}\n  {}\n", row.title(), row.summary()),
        None => println!("Not in a game\n"),
    }

    match lobby.games_view().message() {
        Some(message) => println!("{}", message),
        None => {
            for row in lobby.games_view().rows() {
                println!("{} [{}]\n  {}", row.name(), row.id(), row.summary());
            }
        }
    }
    Ok(())
}

/// Show or change the persisted theme preference.
#[instrument(skip(config))]
fn run_theme(config: &LobbyConfig, choice: Option<ThemeChoice>) -> Result<()> {
    let os_preference = match config.os_theme() {
        Some(theme) => *theme,
        None => EnvThemeProbe.probe(),
    };
    let store = FilePreferenceStore::new(config.preferences_path());
    let mut theme = ThemeController::new(store, os_preference);

    match choice {
        None => {}
        Some(ThemeChoice::Dark) => theme.select(Theme::Dark)?,
        Some(ThemeChoice::Light) => theme.select(Theme::Light)?,
        Some(ThemeChoice::Toggle) => {
            theme.toggle()?;
        }
    }

    let source = match theme.stored_override() {
        Some(_) => "override",
        None => "OS preference",
    };
    info!(theme = %theme.applied(), source, "Theme resolved");
    println!("{} ({})", theme.applied(), source);
    Ok(())
}

fn initialize_stderr_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,strictly_lobby=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
