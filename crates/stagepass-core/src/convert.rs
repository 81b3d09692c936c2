//! Wire → domain conversion.
//!
//! `stagepass-api` hands back [`BookingRecord`]s shaped exactly like the
//! backend's JSON; this module lifts them into the canonical [`Booking`]
//! type (typed id, parsed status). Conversion is total: unknown statuses
//! survive as [`BookingStatus::Other`].

use stagepass_api::BookingRecord;

use crate::model::{Booking, BookingId, BookingStatus};

impl From<BookingRecord> for Booking {
    fn from(record: BookingRecord) -> Self {
        Self {
            id: BookingId::new(record.booking_id),
            customer_name: record.customer_name,
            email: record.email,
            phone: record.phone,
            event_name: record.event_name,
            event_date: record.event_date,
            ticket_type: record.ticket_type,
            price_per_ticket: record.price_per_ticket,
            number_of_tickets: record.number_of_tickets,
            total_price: record.total_price,
            status: BookingStatus::parse(&record.status),
            ticket_id: record.ticket_id,
            created_at: record.created_at,
            used_at: record.used_at,
        }
    }
}

/// Convert a fetched collection in one pass.
pub fn bookings_from_wire(records: Vec<BookingRecord>) -> Vec<Booking> {
    records.into_iter().map(Booking::from).collect()
}
