use thiserror::Error;

use crate::session::StoreError;

/// Error type for the core layer.
///
/// Mostly a thin classification over `stagepass-api` errors, plus the
/// states only the core layer can detect (acting with no credential).
#[derive(Debug, Error)]
pub enum CoreError {
    /// No credential held; the caller must route to login.
    #[error("not signed in")]
    NotAuthenticated,

    /// The backend rejected the credential; the session has already been
    /// invalidated by the time this surfaces.
    #[error("session rejected: {message}")]
    Unauthorized { message: String },

    /// Any other API failure, passed through.
    #[error(transparent)]
    Api(#[from] stagepass_api::Error),

    /// Credential store failure during login.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Whether the UI must send the administrator back to the login screen.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::Unauthorized { .. })
    }

    /// Human-readable text for toasts: the server's own error message
    /// where one exists, a generic rendering otherwise.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized { message } => message.clone(),
            Self::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}
