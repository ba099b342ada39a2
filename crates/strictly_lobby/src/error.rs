//! Error types for lobby server calls.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong with a lobby server call.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LobbyErrorKind {
    /// The server answered with a non-success HTTP status.
    #[display("server responded with HTTP {}", _0)]
    Request(u16),
    /// The request never produced a response (offline, refused, timed out).
    #[display("transport failure: {}", _0)]
    Transport(String),
    /// The server answered 2xx but the body was not what we expected.
    #[display("malformed response: {}", _0)]
    Decode(String),
    /// The endpoint URL could not be built from the configured base URL.
    #[display("invalid endpoint: {}", _0)]
    Endpoint(String),
}

/// Lobby API error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Lobby error: {} at {}:{}", kind, file, line)]
pub struct LobbyError {
    /// Failure category.
    pub kind: LobbyErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LobbyError {
    /// Creates a new lobby error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: LobbyErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Non-success HTTP status.
    #[track_caller]
    pub fn request(status: u16) -> Self {
        Self::new(LobbyErrorKind::Request(status))
    }

    /// Send failure or timeout.
    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(LobbyErrorKind::Transport(message.into()))
    }

    /// Unexpected response body.
    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(LobbyErrorKind::Decode(message.into()))
    }

    /// Endpoint URL could not be built.
    #[track_caller]
    pub fn endpoint(message: impl Into<String>) -> Self {
        Self::new(LobbyErrorKind::Endpoint(message.into()))
    }

    /// Returns true when the server answered with a failure status.
    ///
    /// Everything else (send errors, timeouts, bad bodies) counts as a
    /// transport-level failure for the purpose of user-facing messages.
    pub fn is_request_failure(&self) -> bool {
        matches!(self.kind, LobbyErrorKind::Request(_))
    }
}

impl From<serde_json::Error> for LobbyError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}
