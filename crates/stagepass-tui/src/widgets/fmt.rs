//! Money and date formatting helpers for the booking cards.

use chrono::{DateTime, Utc};

/// Format a rupee amount, dropping the fraction when it's whole
/// (e.g., "₹800", "₹799.50").
pub fn fmt_money(amount: f64) -> String {
    if (amount - amount.trunc()).abs() < 0.005 {
        format!("₹{amount:.0}")
    } else {
        format!("₹{amount:.2}")
    }
}

/// Event date, day precision: "Sep 12, 2026".
pub fn fmt_event_date(t: &DateTime<Utc>) -> String {
    t.format("%b %-d, %Y").to_string()
}

/// Booking timestamp, minute precision: "Aug 1, 2026 08:15".
pub fn fmt_timestamp(t: &DateTime<Utc>) -> String {
    t.format("%b %-d, %Y %H:%M").to_string()
}
