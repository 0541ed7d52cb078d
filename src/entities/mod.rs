//! Entity module - Data shapes shared by every layer of the calendar.
//! Payments are persisted, obligations are derived, and entries tag the two
//! apart in merged views.

pub mod entry;
pub mod obligation;
pub mod payment;

pub use entry::CalendarEntry;
pub use obligation::{ObligationCategory, ObligationId, SYSTEM_ID_PREFIX, SyntheticObligation};
pub use payment::{Payment, PaymentFields, PaymentId, PaymentStatus};
