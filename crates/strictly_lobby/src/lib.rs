//! Strictly Lobby - terminal lobby client for strictly_games servers
//!
//! Polls a game server for joinable games and the player's current game,
//! renders them, and lets the player create, join, leave, or enter a game.
//! A separate theme controller picks light or dark colours and remembers an
//! explicit choice.
//!
//! # Architecture
//!
//! - **Api**: the five lobby endpoints behind the [`LobbyApi`] trait
//! - **Lobby**: [`LobbyController`] owns the views, notices, and current game
//! - **View**: pure renderers from server snapshots to list/panel models
//! - **Theme**: [`ThemeController`] resolves override vs OS preference
//! - **Tui**: ratatui screen hosting both controllers
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use strictly_lobby::{HttpLobbyApi, LobbyController};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let api = HttpLobbyApi::new("http://127.0.0.1:3000", Duration::from_secs(10))?;
//! let mut lobby = LobbyController::new(api, Duration::from_secs(5));
//! lobby.mount().await;
//! println!("{:?}", lobby.games_view());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod config;
mod error;
mod game;
mod lobby;
mod notice;
mod theme;
mod tui;

pub mod view;

// Crate-level exports - Server API
pub use api::{HttpLobbyApi, LobbyApi};

// Crate-level exports - Configuration
pub use config::{ConfigError, LobbyConfig};

// Crate-level exports - Errors
pub use error::{LobbyError, LobbyErrorKind};

// Crate-level exports - Game snapshot
pub use game::{Game, GameId};

// Crate-level exports - Lobby controller
pub use lobby::{CallPolicy, LobbyController, LobbyEvent, LobbyTask, Navigation};

// Crate-level exports - Notices
pub use notice::{DEFAULT_NOTICE_DURATION, Notice, NoticeBoard, Severity};

// Crate-level exports - Theme
pub use theme::{
    EnvThemeProbe, FilePreferenceStore, FixedThemeProbe, MemoryPreferenceStore, OsThemeProbe,
    PreferenceError, PreferenceStore, THEME_KEY, Theme, ThemeClasses, ThemeController,
};

// Crate-level exports - Terminal UI
pub use tui::{App, AppExit, InputMode, draw, run_tui};
