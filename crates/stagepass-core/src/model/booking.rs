// ── Booking domain types ──

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable external booking identifier (e.g. `BK-1001`).
///
/// Opaque server-issued string; never parsed or synthesized client-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so column formatting ({:<9}) applies in list rows
        f.pad(&self.0)
    }
}

impl From<String> for BookingId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for BookingId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Lifecycle status of a booking.
///
/// The server owns the status set; transitions happen exclusively
/// server-side (`pending_payment → {confirmed | rejected}`, then
/// optionally `confirmed → used`). Unknown values are preserved in
/// [`Other`](Self::Other) rather than rejected, so the UI can still
/// display whatever a newer backend sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    Confirmed,
    PendingPayment,
    Rejected,
    Cancelled,
    Used,
    Other(String),
}

impl BookingStatus {
    /// Parse the wire value. Never fails; unrecognized statuses are kept raw.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "confirmed" => Self::Confirmed,
            "pending_payment" => Self::PendingPayment,
            "rejected" => Self::Rejected,
            "cancelled" => Self::Cancelled,
            "used" => Self::Used,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The wire value this status serializes to.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Confirmed => "confirmed",
            Self::PendingPayment => "pending_payment",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Used => "used",
            Self::Other(raw) => raw,
        }
    }

    /// Badge label: fixed text for the known statuses, uppercased raw
    /// value for anything else.
    pub fn label(&self) -> String {
        match self {
            Self::Confirmed => "CONFIRMED".into(),
            Self::PendingPayment => "PENDING".into(),
            Self::Rejected => "REJECTED".into(),
            Self::Cancelled => "CANCELLED".into(),
            Self::Used => "USED".into(),
            Self::Other(raw) => raw.to_uppercase(),
        }
    }
}

impl From<String> for BookingStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.as_str().to_owned()
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical Booking type.
///
/// Read-only from the client's perspective: instances are produced by
/// wire conversion and replaced wholesale on re-fetch, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,

    // Contact fields, unvalidated here
    pub customer_name: String,
    pub email: String,
    pub phone: String,

    // Event reference
    pub event_name: String,
    pub event_date: DateTime<Utc>,

    // Pricing. `total_price` is computed upstream and displayed as
    // received; consistency with price_per_ticket × number_of_tickets
    // is a server concern.
    pub ticket_type: String,
    pub price_per_ticket: f64,
    pub number_of_tickets: u32,
    pub total_price: f64,

    pub status: BookingStatus,

    /// Issued once the booking is confirmed.
    pub ticket_id: Option<String>,

    pub created_at: DateTime<Utc>,
    /// Set only when `status` is [`BookingStatus::Used`].
    pub used_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_round_trips_known_values() {
        for raw in ["confirmed", "pending_payment", "rejected", "cancelled", "used"] {
            assert_eq!(BookingStatus::parse(raw).as_str(), raw);
        }
    }

    #[test]
    fn status_preserves_unknown_raw_value() {
        let status = BookingStatus::parse("on_waitlist");
        assert_eq!(status, BookingStatus::Other("on_waitlist".into()));
        assert_eq!(status.as_str(), "on_waitlist");
        assert_eq!(status.label(), "ON_WAITLIST");
    }

    #[test]
    fn status_labels_match_display_table() {
        assert_eq!(BookingStatus::Confirmed.label(), "CONFIRMED");
        assert_eq!(BookingStatus::PendingPayment.label(), "PENDING");
        assert_eq!(BookingStatus::Rejected.label(), "REJECTED");
        assert_eq!(BookingStatus::Cancelled.label(), "CANCELLED");
        assert_eq!(BookingStatus::Used.label(), "USED");
    }
}
