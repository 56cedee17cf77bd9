use thiserror::Error;

#[derive(Error, Debug)]
pub enum EventsError {
    /// A quoted string in the event looked like an encoded big integer, so the
    /// rewritten document can no longer be trusted.
    #[error(
        "Big integer marker collides with a string value ({replaced} rewrites for {encoded} encoded integers)"
    )]
    SerializationConflict { replaced: usize, encoded: usize },

    #[error("Failed to serialize event: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Failed to decode event: {0}")]
    Decode(#[source] serde_json::Error),

    #[error(
        "Invalid big integer marker {0:?}: must be non-empty and free of quotes, backslashes and control characters"
    )]
    InvalidMarker(String),
}
