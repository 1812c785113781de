//! Middleware wrapped around every route.
//!
//! Layer order, outermost first: CORS, request id, access log, security
//! headers, failure rendering, panic catching, 413 rendering, body ceiling.

use std::any::Any;

use axum::{
    extract::{DefaultBodyLimit, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::{from_fn_with_state, map_response, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use backend_core::{Environment, ErrorResponse};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};
use uuid::Uuid;

use crate::{
    config::GatewayConfig,
    error::{FailureDetail, GatewayError, GENERIC_FAILURE_MESSAGE, INTERNAL_ERROR},
};

/// Response headers added unless a handler already set them.
pub const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("content-security-policy", "default-src 'self'"),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("origin-agent-cluster", "?1"),
    ("referrer-policy", "no-referrer"),
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-permitted-cross-domain-policies", "none"),
    ("x-xss-protection", "0"),
];

/// Wraps `router` in the full middleware stack.
///
/// Routes added to `router` after this call are not covered.
pub fn apply_middleware(router: Router, config: &GatewayConfig) -> Router {
    let limit = config.body_limit_bytes;

    let app = router
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(limit))
        .layer(map_response(payload_too_large_as_json))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(from_fn_with_state(config.environment.clone(), render_failures));

    apply_security_headers(app)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
        .layer(CorsLayer::permissive())
}

/// Adds every entry of [`SECURITY_HEADERS`] to responses.
pub fn apply_security_headers(mut app: Router) -> Router {
    for &(name, value) in SECURITY_HEADERS {
        app = app.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ));
    }
    app
}

/// Replaces any 413 from the body ceiling with the JSON error body.
///
/// Declared lengths over the ceiling are refused before the handler runs;
/// streamed bodies are cut off while the handler reads them.
pub async fn payload_too_large_as_json(response: Response) -> Response {
    if response.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return response;
    }
    tracing::warn!("rejecting oversized request body");
    GatewayError::PayloadTooLarge.into_response()
}

/// Logs responses carrying a [`FailureDetail`] and renders their 500 body.
///
/// The detail reaches the client only in development mode.
pub async fn render_failures(State(environment): State<Environment>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;

    let Some(FailureDetail(detail)) = response.extensions().get::<FailureDetail>().cloned() else {
        return response;
    };
    tracing::error!(%method, %uri, error = %detail, "request failed");
    failure_response(&environment, &detail)
}

/// Builds the 500 body for a failure under `environment`.
#[must_use]
pub fn failure_response(environment: &Environment, detail: &str) -> Response {
    let message = if environment.is_development() {
        detail
    } else {
        GENERIC_FAILURE_MESSAGE
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(INTERNAL_ERROR).with_message(message)),
    )
        .into_response()
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_owned()
    } else {
        "handler panicked".to_owned()
    };
    GatewayError::Internal(detail).into_response()
}

fn request_span(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Generates `x-request-id` values as random UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}
