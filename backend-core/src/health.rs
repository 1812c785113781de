//! Liveness and status payloads, plus the shared error body.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::environment::Environment;

/// Service name reported by every health payload.
pub const SERVICE_NAME: &str = "backend-api";

/// Liveness status value.
pub const STATUS_OK: &str = "OK";

/// Message attached to the root health payload.
pub const ROOT_MESSAGE: &str = "Backend API is healthy and running";

/// Message of the `/api/status` payload.
pub const API_RUNNING_MESSAGE: &str = "Backend API is running";

/// Liveness payload for `GET /` and `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct HealthStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(serialize_with = "crate::timestamp::serialize")]
    pub timestamp: DateTime<Utc>,
    pub service: &'static str,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
}

impl HealthStatus {
    /// The bare liveness payload served by `/health`.
    pub fn ok(version: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            status: STATUS_OK,
            message: None,
            timestamp: now,
            service: SERVICE_NAME,
            version: version.into(),
            environment: None,
        }
    }

    /// The root payload: liveness plus a message and the deployment mode.
    pub fn detailed(version: impl Into<String>, environment: Environment, now: DateTime<Utc>) -> Self {
        Self {
            message: Some(ROOT_MESSAGE.to_owned()),
            environment: Some(environment),
            ..Self::ok(version, now)
        }
    }
}

/// Payload of `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct ApiStatus {
    pub message: &'static str,
    pub environment: Environment,
    #[serde(serialize_with = "crate::timestamp::serialize")]
    pub timestamp: DateTime<Utc>,
}

impl ApiStatus {
    #[must_use]
    pub fn running(environment: Environment, now: DateTime<Utc>) -> Self {
        Self {
            message: API_RUNNING_MESSAGE,
            environment,
            timestamp: now,
        }
    }
}

/// JSON body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// An error body with no detail message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
        }
    }

    /// Attaches a detail message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
