// Booking endpoints
//
// List and mutation calls, plus the wire DTOs. The backend speaks
// camelCase JSON; timestamps are RFC 3339. `stagepass-core` converts
// these records into its canonical domain types.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::debug;

use crate::client::BookingClient;
use crate::error::Error;

/// A booking as the backend serializes it.
///
/// `status` stays a raw string at this layer; the set of statuses is
/// owned by the server and the core layer preserves unknown values for
/// display rather than failing deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub booking_id: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub event_name: String,
    pub event_date: DateTime<Utc>,
    pub ticket_type: String,
    pub price_per_ticket: f64,
    pub number_of_tickets: u32,
    pub total_price: f64,
    pub status: String,
    /// Present once a booking has been confirmed.
    #[serde(default)]
    pub ticket_id: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Present only when the ticket was redeemed at the venue.
    #[serde(default)]
    pub used_at: Option<DateTime<Utc>>,
}

/// `{ "bookings": [...] }` — the list envelope.
#[derive(Debug, Deserialize)]
struct BookingsEnvelope {
    bookings: Vec<BookingRecord>,
}

/// `{ "message": "..." }` — the mutation reply.
#[derive(Debug, Deserialize)]
struct ActionReply {
    message: String,
}

impl BookingClient {
    /// List bookings awaiting approval.
    ///
    /// `GET /bookings/pending`
    pub async fn list_pending(&self, token: &SecretString) -> Result<Vec<BookingRecord>, Error> {
        let url = self.api_url("bookings/pending")?;
        debug!("listing pending bookings");
        let envelope: BookingsEnvelope = self.get(url, token).await?;
        Ok(envelope.bookings)
    }

    /// List the complete booking history.
    ///
    /// `GET /bookings`
    pub async fn list_all(&self, token: &SecretString) -> Result<Vec<BookingRecord>, Error> {
        let url = self.api_url("bookings")?;
        debug!("listing all bookings");
        let envelope: BookingsEnvelope = self.get(url, token).await?;
        Ok(envelope.bookings)
    }

    /// Approve a pending booking. Returns the server's confirmation text.
    ///
    /// `POST /bookings/approve/{bookingId}`
    pub async fn approve(&self, token: &SecretString, booking_id: &str) -> Result<String, Error> {
        let url = self.api_url(&format!("bookings/approve/{booking_id}"))?;
        debug!(booking_id, "approving booking");
        let reply: ActionReply = self.post(url, token).await?;
        Ok(reply.message)
    }

    /// Reject a pending booking. Returns the server's confirmation text.
    ///
    /// `POST /bookings/reject/{bookingId}`
    pub async fn reject(&self, token: &SecretString, booking_id: &str) -> Result<String, Error> {
        let url = self.api_url(&format!("bookings/reject/{booking_id}"))?;
        debug!(booking_id, "rejecting booking");
        let reply: ActionReply = self.post(url, token).await?;
        Ok(reply.message)
    }

    /// Record that a confirmed booking's ticket was collected at the
    /// venue. Returns the server's confirmation text.
    ///
    /// `POST /bookings/mark-used/{bookingId}`
    pub async fn mark_used(&self, token: &SecretString, booking_id: &str) -> Result<String, Error> {
        let url = self.api_url(&format!("bookings/mark-used/{booking_id}"))?;
        debug!(booking_id, "marking ticket used");
        let reply: ActionReply = self.post(url, token).await?;
        Ok(reply.message)
    }
}
