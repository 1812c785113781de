//! Error types for the gateway crate.

use axum::{
    extract::rejection::{BytesRejection, FormRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use backend_core::{CoreError, ErrorResponse};

/// `error` text of every 500 response.
pub const INTERNAL_ERROR: &str = "Something went wrong!";

/// `message` text of a 500 response outside development mode.
pub const GENERIC_FAILURE_MESSAGE: &str = "Internal Server Error";

/// Underlying failure text attached to a 500 response.
///
/// The failure-rendering layer reads this extension to log the failure and
/// decide whether the text may reach the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDetail(pub String);

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The payload failed domain validation.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// The body exceeded the configured ceiling.
    #[error("request body too large")]
    PayloadTooLarge,

    /// No route matches the method and path.
    #[error("route not found")]
    RouteNotFound,

    /// An unexpected failure while producing the response, including a
    /// body that was declared JSON or form data but could not be decoded.
    #[error("internal failure: {0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Validation(e) => (status, Json(ErrorResponse::new(e.to_string()))).into_response(),
            Self::PayloadTooLarge => (status, Json(ErrorResponse::new("Payload too large"))).into_response(),
            Self::RouteNotFound => (status, Json(ErrorResponse::new("Route not found"))).into_response(),
            Self::Internal(detail) => {
                let mut response = (
                    status,
                    Json(ErrorResponse::new(INTERNAL_ERROR).with_message(GENERIC_FAILURE_MESSAGE)),
                )
                    .into_response();
                response.extensions_mut().insert(FailureDetail(detail));
                response
            }
        }
    }
}

impl From<BytesRejection> for GatewayError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::Internal(rejection.body_text())
        }
    }
}

impl From<FormRejection> for GatewayError {
    fn from(rejection: FormRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::Internal(rejection.body_text())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        Self::Internal(e.to_string())
    }
}
