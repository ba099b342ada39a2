//! Lobby client configuration.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tokio::time::Duration;
use tracing::{debug, info, instrument};

use crate::Theme;

/// Configuration for the lobby client, loaded from TOML.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct LobbyConfig {
    /// Base URL of the game server.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Seconds between background refreshes.
    #[serde(default = "default_poll_interval_secs")]
    poll_interval_secs: u64,

    /// Seconds a status notice stays visible.
    #[serde(default = "default_notice_duration_secs")]
    notice_duration_secs: u64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,

    /// File holding client-local preferences (the theme override).
    #[serde(default = "default_preferences_path")]
    preferences_path: PathBuf,

    /// Log file for the TUI.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Pins the OS theme preference instead of probing the terminal.
    #[serde(default)]
    os_theme: Option<Theme>,
}

#[instrument]
fn default_server_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

#[instrument]
fn default_poll_interval_secs() -> u64 {
    5
}

#[instrument]
fn default_notice_duration_secs() -> u64 {
    5
}

#[instrument]
fn default_request_timeout_secs() -> u64 {
    10
}

#[instrument]
fn default_preferences_path() -> PathBuf {
    PathBuf::from("strictly_lobby_prefs.toml")
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_lobby.log")
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            poll_interval_secs: default_poll_interval_secs(),
            notice_duration_secs: default_notice_duration_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            preferences_path: default_preferences_path(),
            log_file: default_log_file(),
            os_theme: None,
        }
    }
}

impl LobbyConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::new(
                "poll_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::new(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Overrides the server URL.
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    /// Pins the OS theme preference.
    pub fn with_os_theme(mut self, theme: Theme) -> Self {
        self.os_theme = Some(theme);
        self
    }

    /// Background refresh period.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Notice visibility window.
    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_duration_secs)
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_lobby_timings() {
        let config = LobbyConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.notice_duration(), Duration::from_secs(5));
        assert!(config.os_theme().is_none());
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: LobbyConfig = toml::from_str(
            r#"server_url = "http://lobby.example:8080"
os_theme = "light"
"#,
        )
        .unwrap();
        assert_eq!(config.server_url(), "http://lobby.example:8080");
        assert_eq!(*config.os_theme(), Some(Theme::Light));
        assert_eq!(*config.poll_interval_secs(), 5);
    }
}
