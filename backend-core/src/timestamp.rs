//! ISO-8601 rendering shared by every timestamped payload.
//!
//! Timestamps go out as RFC 3339 in UTC with millisecond precision and a
//! `Z` suffix, e.g. `2026-10-18T09:15:02.481Z`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// Formats `ts` in the wire format used by all responses.
#[must_use]
pub fn to_iso8601(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `serialize_with` adapter for [`DateTime<Utc>`] fields.
///
/// # Errors
/// Propagates the serializer's error.
pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_iso8601(ts))
}
