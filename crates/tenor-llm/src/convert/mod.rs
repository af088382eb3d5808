//! Conversion between the normalized types and provider wire formats
//!
//! Outbound conversions turn a [`crate::validate::ValidatedRequest`] into a
//! provider request body; inbound conversions turn the raw provider JSON into
//! a [`crate::types::ChatResponse`].

pub mod gemini;
pub mod ollama;
pub mod openai;

use jiff::Timestamp;

/// Parse an RFC 3339 timestamp, falling back to the current time
fn timestamp_or_now(value: Option<&str>) -> Timestamp {
    value
        .and_then(|raw| raw.parse::<Timestamp>().ok())
        .unwrap_or_else(Timestamp::now)
}
