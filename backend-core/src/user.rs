//! Sample user records.
//!
//! Nothing here is stored: the list endpoint serves [`seed_users`] and the
//! create endpoint echoes a [`CreatedUser`] synthesized from the request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::CoreError, id::UserId};

/// A user as listed by `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl UserRecord {
    /// Creates a user record.
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A user synthesized by `POST /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct CreatedUser {
    #[serde(flatten)]
    pub user: UserRecord,
    /// Instant the record was synthesized.
    #[serde(serialize_with = "crate::timestamp::serialize")]
    pub created_at: DateTime<Utc>,
}

/// Body of `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct UserList {
    pub users: Vec<UserRecord>,
}

impl UserList {
    /// The fixed sample listing.
    #[must_use]
    pub fn seed() -> Self {
        Self { users: seed_users() }
    }
}

/// Returns the two fixed sample users.
#[must_use]
pub fn seed_users() -> Vec<UserRecord> {
    vec![
        UserRecord::new(1, "John Doe", "john@example.com"),
        UserRecord::new(2, "Jane Smith", "jane@example.com"),
    ]
}

/// Decoded create-user payload, before validation.
///
/// Both fields are optional at the decoding stage so a missing field is a
/// validation failure rather than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl NewUser {
    /// Validates the payload and synthesizes the resulting record.
    ///
    /// The id is derived from `now` in milliseconds.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingUserFields`] if `name` or `email` is
    /// absent or empty.
    pub fn into_user(self, now: DateTime<Utc>) -> Result<CreatedUser, CoreError> {
        let name = self.name.filter(|n| !n.is_empty());
        let email = self.email.filter(|e| !e.is_empty());
        let (Some(name), Some(email)) = (name, email) else {
            return Err(CoreError::MissingUserFields);
        };
        Ok(CreatedUser {
            user: UserRecord {
                id: UserId::from_timestamp(&now),
                name,
                email,
            },
            created_at: now,
        })
    }
}
