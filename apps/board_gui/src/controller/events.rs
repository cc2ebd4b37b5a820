//! Backend events and status-banner state for the activity board controller.

use std::time::{Duration, Instant};

use board_client::ClientError;
use shared::Roster;

pub enum UiEvent {
    RosterLoaded(Roster),
    RosterLoadFailed { reason: String },
    SignupSucceeded { message: String },
    SignupFailed(RequestFailure),
    UnregisterSucceeded { message: String },
    UnregisterFailed(RequestFailure),
}

/// Which write operation a failure belongs to. The transport fallback text
/// differs per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    Signup,
    Unregister,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// The request never produced a server answer.
    Transport,
    /// The server answered with a non-success status, optionally carrying
    /// failure text in its body.
    Rejected { detail: Option<String> },
}

impl RequestFailure {
    pub fn from_client_error(err: &ClientError) -> Self {
        match err {
            ClientError::Api { detail, .. } => RequestFailure::Rejected {
                detail: detail.clone(),
            },
            _ => RequestFailure::Transport,
        }
    }

    /// Banner text: the server's detail verbatim when it sent one,
    /// otherwise a fixed fallback.
    pub fn display_text(&self, action: BoardAction) -> String {
        match self {
            RequestFailure::Transport => match action {
                BoardAction::Signup => "Failed to sign up. Please try again.".to_string(),
                BoardAction::Unregister => "Failed to unregister. Please try again.".to_string(),
            },
            RequestFailure::Rejected { detail } => detail
                .clone()
                .unwrap_or_else(|| "An error occurred".to_string()),
        }
    }
}

pub const STATUS_BANNER_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSeverity {
    Success,
    Error,
}

/// The transient message region. There is exactly one slot: a new banner
/// replaces the old one and restarts the hide clock, so a stale deadline
/// can never hide a newer message early.
#[derive(Debug, Clone)]
pub struct StatusBanner {
    pub severity: StatusSeverity,
    pub message: String,
    shown_at: Instant,
}

impl StatusBanner {
    pub fn success(message: impl Into<String>) -> Self {
        Self::shown_now(StatusSeverity::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::shown_now(StatusSeverity::Error, message)
    }

    fn shown_now(severity: StatusSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= STATUS_BANNER_TTL
    }

    pub fn deadline(&self) -> Instant {
        self.shown_at + STATUS_BANNER_TTL
    }
}
