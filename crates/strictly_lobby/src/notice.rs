//! Transient status notices shown above the lobby.

use derive_getters::Getters;
use strum::{AsRefStr, Display, EnumString};
use tokio::time::{Duration, Instant};
use tracing::{debug, instrument};

/// How long a notice stays visible unless configured otherwise.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_secs(5);

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// The action went through.
    Success,
    /// The action failed.
    Error,
}

/// A status message with its severity.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Notice {
    /// Text shown to the user.
    message: String,
    severity: Severity,
}

impl Notice {
    /// Creates a notice.
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    /// Success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    /// Error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }
}

/// Single-slot notice display.
///
/// Showing a notice overwrites the previous one and restarts the hide timer;
/// there is no queue.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    current: Option<(Notice, Instant)>,
    duration: Duration,
}

impl NoticeBoard {
    /// Creates an empty board whose notices hide after `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    /// Shows `notice` immediately, replacing whatever was shown.
    #[instrument(skip(self), fields(severity = %notice.severity))]
    pub fn show(&mut self, notice: Notice) {
        debug!(message = %notice.message, "Showing notice");
        self.current = Some((notice, Instant::now()));
    }

    /// The notice to display right now, if it has not expired.
    pub fn visible(&self) -> Option<&Notice> {
        self.visible_at(Instant::now())
    }

    /// The notice that would be displayed at `now`.
    pub fn visible_at(&self, now: Instant) -> Option<&Notice> {
        match &self.current {
            Some((notice, shown_at)) if now.duration_since(*shown_at) < self.duration => {
                Some(notice)
            }
            _ => None,
        }
    }

    /// The last notice shown, expired or not.
    pub fn last(&self) -> Option<&Notice> {
        self.current.as_ref().map(|(notice, _)| notice)
    }

    /// Visibility window.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn notice_hides_after_duration() {
        let mut board = NoticeBoard::default();
        board.show(Notice::success("Left game successfully"));
        assert_eq!(
            board.visible().map(|n| n.message().as_str()),
            Some("Left game successfully")
        );

        tokio::time::advance(Duration::from_millis(4_999)).await;
        assert!(board.visible().is_some());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(board.visible().is_none());
        assert!(board.last().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_notice_replaces_and_restarts_timer() {
        let mut board = NoticeBoard::default();
        board.show(Notice::error("Failed to join game"));
        tokio::time::advance(Duration::from_secs(4)).await;

        board.show(Notice::success("Joined game 'Foo'!"));
        tokio::time::advance(Duration::from_secs(3)).await;

        let visible = board.visible().expect("newer notice still visible");
        assert_eq!(*visible.severity(), Severity::Success);
        assert_eq!(visible.message(), "Joined game 'Foo'!");
    }

    #[test]
    fn severity_renders_lowercase() {
        assert_eq!(Severity::Success.to_string(), "success");
        assert_eq!(Severity::Error.as_ref(), "error");
    }
}
