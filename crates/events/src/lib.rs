//! # Chartfeed Events
//!
//! The event model of the charting host's market-data feed and its
//! big-integer-safe JSON encoding.
//!
//! The host delivers each event as a loose record with one optional field per
//! payload variant (`RawEvent`). `event_copy` turns it into a typed [`Event`]
//! whose single payload is picked by the header's union id, and
//! [`JsonEncoder`] renders that event without losing 64-bit precision.

// Declare the modules that make up this crate.
pub mod error;
pub mod event;
pub mod json;

// Re-export the core types to provide a clean public API.
pub use error::EventsError;
pub use event::{Event, Payload, PayloadRef, RawEvent, event_copy, select_payload};
pub use json::{DEFAULT_MARKER, JsonEncoder, MAX_SAFE_INTEGER, decode, event_to_json};
