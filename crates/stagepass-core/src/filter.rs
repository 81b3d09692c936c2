//! Client-side booking search.
//!
//! Pure substring filter over an in-memory list; no indexing, no
//! tokenization. The query is trimmed and lowercased once, then matched
//! case-insensitively against customer name, booking ID, email, and
//! ticket ID. The phone field is compared without folding (digits and
//! separators carry no case).

use crate::model::Booking;

/// Filter a booking list by a free-text query.
///
/// A blank query returns the list unchanged. Borrowed results keep the
/// caller's ordering.
pub fn filter_bookings<'a>(bookings: &'a [Booking], query: &str) -> Vec<&'a Booking> {
    let folded = query.trim().to_lowercase();
    if folded.is_empty() {
        return bookings.iter().collect();
    }
    bookings.iter().filter(|b| matches(b, &folded)).collect()
}

/// Whether a booking matches an already-folded (trimmed, lowercased) query.
fn matches(booking: &Booking, folded: &str) -> bool {
    booking.customer_name.to_lowercase().contains(folded)
        || booking.id.as_str().to_lowercase().contains(folded)
        || booking.email.to_lowercase().contains(folded)
        || booking.phone.contains(folded)
        || booking
            .ticket_id
            .as_deref()
            .is_some_and(|t| t.to_lowercase().contains(folded))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::model::{BookingId, BookingStatus};

    fn booking(id: &str, name: &str, email: &str, phone: &str, ticket: Option<&str>) -> Booking {
        Booking {
            id: BookingId::new(id),
            customer_name: name.into(),
            email: email.into(),
            phone: phone.into(),
            event_name: "Spring Gala".into(),
            event_date: Utc.with_ymd_and_hms(2026, 9, 12, 19, 30, 0).unwrap(),
            ticket_type: "Balcony".into(),
            price_per_ticket: 400.0,
            number_of_tickets: 2,
            total_price: 800.0,
            status: BookingStatus::PendingPayment,
            ticket_id: ticket.map(str::to_owned),
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 8, 15, 0).unwrap(),
            used_at: None,
        }
    }

    fn fixture() -> Vec<Booking> {
        vec![
            booking(
                "BK-1001",
                "Asha Rao",
                "asha@example.com",
                "+91-98450-12345",
                None,
            ),
            booking(
                "BK-1002",
                "Miguel Ortega",
                "miguel@example.org",
                "+34-600-555-222",
                Some("TK-77-B"),
            ),
        ]
    }

    #[test]
    fn blank_query_returns_all() {
        let all = fixture();
        assert_eq!(filter_bookings(&all, "").len(), 2);
        assert_eq!(filter_bookings(&all, "   ").len(), 2);
    }

    #[test]
    fn matches_name_case_insensitively() {
        let all = fixture();
        let hits = filter_bookings(&all, "ASHA");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "BK-1001");
    }

    #[test]
    fn matches_booking_id_case_insensitively() {
        let all = fixture();
        assert_eq!(filter_bookings(&all, "bk-1002").len(), 1);
    }

    #[test]
    fn matches_email() {
        let all = fixture();
        let hits = filter_bookings(&all, "example.org");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].customer_name, "Miguel Ortega");
    }

    #[test]
    fn matches_ticket_id_when_present() {
        let all = fixture();
        assert_eq!(filter_bookings(&all, "tk-77").len(), 1);
        // BK-1001 has no ticket yet; its other fields don't contain this
        assert_eq!(filter_bookings(&all, "TK-77")[0].id.as_str(), "BK-1002");
    }

    #[test]
    fn matches_phone_verbatim() {
        let all = fixture();
        let hits = filter_bookings(&all, "98450");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "BK-1001");
    }

    #[test]
    fn query_is_trimmed_before_matching() {
        let all = fixture();
        assert_eq!(filter_bookings(&all, "  miguel  ").len(), 1);
    }

    #[test]
    fn no_match_returns_empty() {
        let all = fixture();
        assert!(filter_bookings(&all, "zzz-nope").is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let all = fixture();
        let hits = filter_bookings(&all, "example");
        let ids: Vec<_> = hits.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["BK-1001", "BK-1002"]);
    }
}
