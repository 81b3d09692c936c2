//! Canonical domain types for the booking desk.

mod booking;

pub use booking::{Booking, BookingId, BookingStatus};
