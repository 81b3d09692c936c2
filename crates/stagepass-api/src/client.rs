// Box-office HTTP client
//
// Wraps `reqwest::Client` with base-URL construction, bearer-token
// injection, and error-payload unwrapping. Endpoint methods live in
// `bookings.rs` as inherent impls to keep this module focused on
// transport mechanics.

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Non-2xx responses carry `{"error": "human readable text"}`.
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
}

/// Raw HTTP client for the box-office booking API.
///
/// Every request carries the administrator's bearer token, passed per
/// call rather than stored; the owning session may replace its
/// credential (re-login) while the client lives on. Responses are
/// unwrapped before the caller sees them: 401/403 become
/// [`Error::Unauthorized`], other non-2xx statuses surface the server's
/// `error` text, and 2xx bodies are deserialized into the success shape.
pub struct BookingClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BookingClient {
    /// Create a new client from a base URL and transport config.
    ///
    /// `base_url` should be the API root (e.g. `https://tickets.example.com/api`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client` (tests).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/{path}`.
    ///
    /// Tolerates a trailing slash on the configured base URL.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send an authenticated GET and unwrap the response.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &SecretString,
    ) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Send an authenticated POST with an empty JSON body and unwrap the
    /// response. The mutating endpoints take no request payload; the
    /// booking ID rides in the path.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &SecretString,
    ) -> Result<T, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .bearer_auth(token.expose_secret())
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Map status + body into the crate error taxonomy, or deserialize
    /// the success shape.
    async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(Error::Unauthorized {
                status: status.as_u16(),
                message: Self::error_text(&body)
                    .unwrap_or_else(|| "admin credential rejected".into()),
            });
        }

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: Self::error_text(&body)
                    .unwrap_or_else(|| format!("HTTP {status}: {}", body_preview(&body))),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", body_preview(&body)),
            body,
        })
    }

    /// Extract the server's `error` field from a failure body, if present.
    fn error_text(body: &str) -> Option<String> {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|msg| !msg.is_empty())
    }
}

/// First 200 bytes of a body for diagnostics.
fn body_preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
