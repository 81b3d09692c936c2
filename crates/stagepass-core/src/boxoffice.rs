//! The `BoxOffice` facade — everything the admin UI calls.
//!
//! Owns the HTTP client and the [`Session`], and exposes the five
//! operations of the admin surface as typed async methods. Each call is
//! oneshot: read the current token, issue one request, convert the
//! result. There is no background refresh or caching here; the UI owns
//! its lists and decides when to re-fetch.
//!
//! Authentication policy lives in one place: a 401/403 from any call
//! invalidates the session before the error is returned, so callers only
//! have to check [`CoreError::requires_login`] and route to login.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, warn};
use url::Url;

use stagepass_api::{BookingClient, TransportConfig};

use crate::convert::bookings_from_wire;
use crate::error::CoreError;
use crate::model::{Booking, BookingId};
use crate::session::Session;

/// Connection settings for the box-office backend.
#[derive(Debug, Clone)]
pub struct BoxOfficeConfig {
    /// API root, e.g. `https://tickets.example.com/api`.
    pub base_url: Url,
    pub transport: TransportConfig,
}

/// Facade over the booking API, bound to an admin [`Session`].
///
/// Cheap to clone; fetch tasks hold their own handle.
#[derive(Clone)]
pub struct BoxOffice {
    client: Arc<BookingClient>,
    session: Arc<Session>,
}

impl BoxOffice {
    pub fn new(config: &BoxOfficeConfig, session: Arc<Session>) -> Result<Self, CoreError> {
        let client = BookingClient::new(config.base_url.clone(), &config.transport)
            .map_err(CoreError::Api)?;
        Ok(Self {
            client: Arc::new(client),
            session,
        })
    }

    /// Wrap a pre-built client (tests).
    pub fn with_client(client: BookingClient, session: Arc<Session>) -> Self {
        Self {
            client: Arc::new(client),
            session,
        }
    }

    /// The session this desk authenticates with.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    // ── Fetchers ─────────────────────────────────────────────────────

    /// Bookings awaiting approval.
    pub async fn pending_bookings(&self) -> Result<Vec<Booking>, CoreError> {
        let token = self.require_token()?;
        let records = self
            .client
            .list_pending(&token)
            .await
            .map_err(|e| self.classify(e))?;
        debug!(count = records.len(), "fetched pending bookings");
        Ok(bookings_from_wire(records))
    }

    /// Complete booking history.
    pub async fn all_bookings(&self) -> Result<Vec<Booking>, CoreError> {
        let token = self.require_token()?;
        let records = self
            .client
            .list_all(&token)
            .await
            .map_err(|e| self.classify(e))?;
        debug!(count = records.len(), "fetched all bookings");
        Ok(bookings_from_wire(records))
    }

    // ── Admin actions ────────────────────────────────────────────────

    /// Approve a pending booking. Returns the server's confirmation text.
    pub async fn approve(&self, id: &BookingId) -> Result<String, CoreError> {
        let token = self.require_token()?;
        self.client
            .approve(&token, id.as_str())
            .await
            .map_err(|e| self.classify(e))
    }

    /// Reject a pending booking. Returns the server's confirmation text.
    pub async fn reject(&self, id: &BookingId) -> Result<String, CoreError> {
        let token = self.require_token()?;
        self.client
            .reject(&token, id.as_str())
            .await
            .map_err(|e| self.classify(e))
    }

    /// Record ticket collection at the venue for a confirmed booking.
    pub async fn mark_used(&self, id: &BookingId) -> Result<String, CoreError> {
        let token = self.require_token()?;
        self.client
            .mark_used(&token, id.as_str())
            .await
            .map_err(|e| self.classify(e))
    }

    // ── Internals ────────────────────────────────────────────────────

    fn require_token(&self) -> Result<SecretString, CoreError> {
        self.session.token().ok_or(CoreError::NotAuthenticated)
    }

    /// Classify an API error, tearing the session down on credential
    /// rejection so every caller inherits the logout policy.
    fn classify(&self, error: stagepass_api::Error) -> CoreError {
        if error.is_auth_expired() {
            warn!(error = %error, "backend rejected credential, invalidating session");
            self.session.invalidate();
            return CoreError::Unauthorized {
                message: error.user_message(),
            };
        }
        CoreError::Api(error)
    }
}
