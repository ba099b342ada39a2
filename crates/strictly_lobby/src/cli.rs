//! Command-line interface for strictly_lobby.

use clap::{Parser, Subcommand, ValueEnum};

/// Strictly Lobby - browse, create and join games on a strictly_games server
#[derive(Parser, Debug)]
#[command(name = "strictly_lobby")]
#[command(about = "Terminal lobby for strictly_games servers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults are used if it does not exist)
    #[arg(short, long, default_value = "strictly_lobby.toml")]
    pub config: std::path::PathBuf,

    /// Game server URL, overrides the config file
    #[arg(long, env = "STRICTLY_LOBBY_SERVER_URL")]
    pub server_url: Option<String>,

    /// Subcommand to run (defaults to the lobby TUI)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the lobby terminal UI
    Tui,

    /// Print the game list and the current game once
    List,

    /// Show or change the persisted theme preference
    Theme {
        /// Theme to select; omit to show the current one
        #[arg(value_enum)]
        choice: Option<ThemeChoice>,
    },
}

/// Theme choices on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    /// Select the dark theme
    Dark,
    /// Select the light theme
    Light,
    /// Switch to the opposite of the current theme
    Toggle,
}
