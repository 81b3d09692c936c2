//! Business logic and domain model for the stagepass admin desk.
//!
//! Sits between `stagepass-api` (the wire) and the TUI:
//!
//! - **[`BoxOffice`]** — facade the UI calls: two list fetches and three
//!   admin actions, each a oneshot authenticated request. A 401/403 from
//!   any call invalidates the session before the error surfaces.
//!
//! - **[`Session`]** — explicit auth context: current bearer token plus a
//!   [`TokenStore`] persistence seam (keyring in production, in-memory in
//!   tests). Replaces ambient credential storage so the guard logic is
//!   testable.
//!
//! - **Domain model** ([`model`]) — [`Booking`], [`BookingId`], and
//!   [`BookingStatus`] with a raw-preserving fallback for statuses this
//!   build doesn't know about.
//!
//! - **[`filter`]** — the pure client-side search the panel applies to
//!   whichever list is on screen.

pub mod boxoffice;
pub mod convert;
pub mod error;
pub mod filter;
pub mod model;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use boxoffice::{BoxOffice, BoxOfficeConfig};
// Transport settings surface through [`BoxOfficeConfig`]; re-exported so
// binaries don't need a direct `stagepass-api` dependency.
pub use stagepass_api::{TlsMode, TransportConfig};
pub use error::CoreError;
pub use filter::filter_bookings;
pub use model::{Booking, BookingId, BookingStatus};
pub use session::{MemoryTokenStore, Session, StoreError, TokenStore};
