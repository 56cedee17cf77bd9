//! JSON encoding of events that keeps 64-bit integers exact.
//!
//! Generic JSON consumers read every number as an IEEE double, which only holds
//! integers up to 2^53 - 1 exactly. Prices, order ids and nanosecond timestamps
//! routinely exceed that. The encoder emits such integers as bare decimal
//! literals of any length, so a big-integer-aware parser reads them back
//! exactly.
//!
//! Encoding happens in two passes:
//!
//! 1. Every integer outside the safe range is replaced by the quoted token
//!    `"<digits><marker>"` and counted.
//! 2. Every quoted `"<digits><marker>"` in the rendered text is rewritten to
//!    `<digits>` and counted.
//!
//! More rewrites than encoded integers means a genuine string in the event
//! looked like a marker token. The output would be corrupted, so encoding fails
//! with [`EventsError::SerializationConflict`].

use crate::error::EventsError;
use crate::event::{Event, RawEvent, event_copy};
use regex::{Captures, Regex};
use serde_json::{Number, Value};

/// Largest magnitude an IEEE double represents exactly: 2^53 - 1.
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Suffix the host client appends to big-integer tokens.
pub const DEFAULT_MARKER: &str = "#bigint";

/// Encodes events to text, rendering out-of-range integers as bare literals.
///
/// Immutable once built, so one encoder can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct JsonEncoder {
    marker: String,
    pattern: Regex,
}

impl JsonEncoder {
    /// Builds an encoder using `marker` as the big-integer token suffix.
    ///
    /// The marker must survive JSON string rendering unchanged, so it may not be
    /// empty or contain quotes, backslashes or control characters.
    pub fn new(marker: impl Into<String>) -> Result<Self, EventsError> {
        let marker = marker.into();
        if marker.is_empty() || marker.chars().any(|c| c == '"' || c == '\\' || c.is_control()) {
            return Err(EventsError::InvalidMarker(marker));
        }
        let pattern = Regex::new(&format!(r#""(-?\d+){}""#, regex::escape(&marker)))
            .map_err(|_| EventsError::InvalidMarker(marker.clone()))?;
        Ok(Self { marker, pattern })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Encodes an already-copied event.
    pub fn encode(&self, event: &Event) -> Result<String, EventsError> {
        let mut document = serde_json::to_value(event).map_err(EventsError::Serialization)?;
        let encoded = mark_big_integers(&mut document, &self.marker);
        let text = serde_json::to_string(&document).map_err(EventsError::Serialization)?;

        let mut replaced = 0;
        let output = self.pattern.replace_all(&text, |caps: &Captures<'_>| {
            replaced += 1;
            caps[1].to_string()
        });

        if replaced > encoded {
            tracing::warn!(
                replaced,
                encoded,
                marker = %self.marker,
                "String value collides with the big integer marker."
            );
            return Err(EventsError::SerializationConflict { replaced, encoded });
        }
        tracing::debug!(encoded, bytes = output.len(), "Encoded event.");
        Ok(output.into_owned())
    }

    /// Copies a host-shaped event, then encodes the copy.
    pub fn event_to_json(&self, event: &RawEvent) -> Result<String, EventsError> {
        self.encode(&event_copy(event))
    }

    /// Parses encoder output (or any host-shaped JSON) back into an [`Event`].
    ///
    /// Bare oversized literals are read straight into the 64-bit fields,
    /// so nothing is rounded.
    pub fn decode(&self, text: &str) -> Result<Event, EventsError> {
        decode(text)
    }
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER).expect("default marker is valid")
    }
}

/// Encodes a host-shaped event with the default marker.
pub fn event_to_json(event: &RawEvent) -> Result<String, EventsError> {
    JsonEncoder::default().event_to_json(event)
}

pub fn decode(text: &str) -> Result<Event, EventsError> {
    let raw: RawEvent = serde_json::from_str(text).map_err(EventsError::Decode)?;
    Ok(event_copy(&raw))
}

/// Replaces every unsafe integer in `value` with its marker token and returns
/// how many were replaced.
fn mark_big_integers(value: &mut Value, marker: &str) -> usize {
    match value {
        Value::Array(items) => items.iter_mut().map(|item| mark_big_integers(item, marker)).sum(),
        Value::Object(map) => map.values_mut().map(|item| mark_big_integers(item, marker)).sum(),
        Value::Number(number) => match unsafe_integer_digits(number) {
            Some(digits) => {
                *value = Value::String(format!("{digits}{marker}"));
                1
            }
            None => 0,
        },
        _ => 0,
    }
}

/// Decimal digits of `number` if it is an integer a double cannot hold exactly.
fn unsafe_integer_digits(number: &Number) -> Option<String> {
    let unsafe_int = match (number.as_u64(), number.as_i64()) {
        (Some(n), _) => n > MAX_SAFE_INTEGER,
        (None, Some(n)) => n.unsigned_abs() > MAX_SAFE_INTEGER,
        // floats are left to the standard rendering
        (None, None) => false,
    };
    unsafe_int.then(|| number.to_string())
}
