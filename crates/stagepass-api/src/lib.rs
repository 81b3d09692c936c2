//! Async client for the stagepass box-office booking API.
//!
//! Thin, typed wrapper over the backend's REST surface: two list
//! endpoints (`/bookings/pending`, `/bookings`) and three admin actions
//! (approve, reject, mark-used), all bearer-authenticated. The client
//! unwraps the backend's error payloads into a structured [`Error`]
//! taxonomy; 401/403 responses map to [`Error::Unauthorized`] so callers
//! can tear the session down.
//!
//! The crate deliberately stops at the wire: [`BookingRecord`] is the
//! serialization shape, not the domain model. `stagepass-core` owns the
//! canonical types.

pub mod bookings;
pub mod client;
pub mod error;
pub mod transport;

pub use bookings::BookingRecord;
pub use client::BookingClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
