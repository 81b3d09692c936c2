//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;
use std::sync::Arc;

use stagepass_core::{Booking, BookingId};

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Pending confirmation — every mutating booking action goes through one.
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    Approve { id: BookingId, name: String },
    Reject { id: BookingId, name: String },
    MarkUsed { id: BookingId, name: String },
}

impl ConfirmAction {
    /// Which list the successful action must refresh.
    pub fn refreshes(&self) -> ScreenId {
        match self {
            Self::Approve { .. } | Self::Reject { .. } => ScreenId::Pending,
            Self::MarkUsed { .. } => ScreenId::All,
        }
    }
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approve { name, .. } => write!(f, "Approve booking for {name}?"),
            Self::Reject { name, .. } => write!(f, "Reject booking for {name}?"),
            Self::MarkUsed { name, .. } => {
                write!(f, "Mark {name}'s ticket as used at the venue?")
            }
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),

    // ── Session ───────────────────────────────────────────────────
    /// Token submitted on the login screen.
    LoginSubmit(String),
    /// Explicit sign-out.
    Logout,
    /// The backend rejected the credential mid-session.
    SessionExpired { message: String },

    // ── Data ──────────────────────────────────────────────────────
    /// Re-fetch the active view's list.
    Refresh,
    /// A fetch for `screen` was dispatched with this generation.
    FetchStarted { screen: ScreenId, generation: u64 },
    PendingLoaded {
        generation: u64,
        bookings: Arc<Vec<Booking>>,
    },
    AllLoaded {
        generation: u64,
        bookings: Arc<Vec<Booking>>,
    },
    FetchFailed {
        screen: ScreenId,
        generation: u64,
        message: String,
        requires_login: bool,
    },

    // ── Booking commands ──────────────────────────────────────────
    RequestApprove { id: BookingId, name: String },
    RequestReject { id: BookingId, name: String },
    RequestMarkUsed { id: BookingId, name: String },

    // ── Confirm Dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    /// A confirmed action completed; `refresh` names the list to re-fetch.
    ActionFinished { message: String, refresh: ScreenId },
    ActionFailed {
        message: String,
        requires_login: bool,
    },

    // ── Search ────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    SearchSubmit,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
