use thiserror::Error;

/// Top-level error type for the `stagepass-api` crate.
///
/// Covers every failure mode of the box-office REST surface: credential
/// rejection, transport, structured API errors, and malformed payloads.
/// `stagepass-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The backend rejected the bearer token (HTTP 401 or 403).
    ///
    /// Callers are expected to discard the stored credential and send the
    /// administrator back to the login screen.
    #[error("Not authorized (HTTP {status}): {message}")]
    Unauthorized { status: u16, message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx response, with the server's `{"error": "..."}` text when
    /// the body carried one.
    #[error("Booking API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the stored credential is no
    /// longer valid and the session must be torn down.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns `true` if this is a transient error worth retrying manually.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// The message shown to the administrator, stripped of HTTP mechanics.
    ///
    /// For `Api` and `Unauthorized` this is the server's own error text;
    /// everything else falls back to the Display rendering.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::Unauthorized { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
