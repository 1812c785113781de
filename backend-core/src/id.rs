use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Numeric identifier of a user record.
///
/// Generated ids are the creation instant in milliseconds since the Unix
/// epoch; they are not guaranteed unique across concurrent requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Derives an id from a creation instant.
    #[must_use]
    pub fn from_timestamp(at: &DateTime<Utc>) -> Self {
        Self(at.timestamp_millis())
    }

    /// Returns the inner integer.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}
