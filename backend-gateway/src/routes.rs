//! Axum route handlers for the backend API.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use backend_core::{ApiStatus, Clock, HealthStatus, UserList};

use crate::{error::GatewayError, extract::UserPayload, middleware::apply_middleware, state::AppState};

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router, wrapped in the full middleware stack.
///
/// Known paths answer unsupported methods with the same 404 as unknown paths.
pub fn create_router<C>(state: AppState<C>) -> Router
where
    C: Clock + Clone + 'static,
{
    let config = state.config().clone();
    let routes = Router::new()
        .route("/", get(root::<C>).fallback(not_found))
        .route("/health", get(health::<C>).fallback(not_found))
        .route("/api/status", get(api_status::<C>).fallback(not_found))
        .route(
            "/api/users",
            get(list_users).post(create_user::<C>).fallback(not_found),
        )
        .fallback(not_found)
        .with_state(state);
    apply_middleware(routes, &config)
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /` — liveness with message and deployment mode.
pub async fn root<C: Clock>(State(state): State<AppState<C>>) -> Json<HealthStatus> {
    let config = state.config();
    Json(HealthStatus::detailed(
        config.version.clone(),
        config.environment.clone(),
        state.now(),
    ))
}

/// `GET /health` — liveness probe.
pub async fn health<C: Clock>(State(state): State<AppState<C>>) -> Json<HealthStatus> {
    Json(HealthStatus::ok(state.config().version.clone(), state.now()))
}

/// `GET /api/status`
pub async fn api_status<C: Clock>(State(state): State<AppState<C>>) -> Json<ApiStatus> {
    Json(ApiStatus::running(state.config().environment.clone(), state.now()))
}

/// `GET /api/users` — the fixed sample users.
pub async fn list_users() -> Json<UserList> {
    Json(UserList::seed())
}

/// `POST /api/users` — echo a synthesized user; nothing is stored.
///
/// # Errors
/// Returns [`GatewayError::Validation`] if `name` or `email` is missing or
/// empty, or [`GatewayError::Internal`] if the body cannot be decoded.
pub async fn create_user<C: Clock>(
    State(state): State<AppState<C>>,
    UserPayload(payload): UserPayload,
) -> Result<impl IntoResponse, GatewayError> {
    let created = payload.into_user(state.now())?;
    tracing::debug!(id = %created.user.id, "synthesized user");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Fallback for unmatched paths and unsupported methods.
pub async fn not_found() -> GatewayError {
    GatewayError::RouteNotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use backend_core::FixedClock;
    use chrono::{TimeZone, Utc};
    use tower::ServiceExt;

    use crate::config::GatewayConfig;

    const NOW_MILLIS: i64 = 1_760_781_600_000;

    fn test_app() -> Router {
        let now = match Utc.timestamp_millis_opt(NOW_MILLIS).single() {
            Some(t) => t,
            None => panic!("valid timestamp"),
        };
        create_router(AppState::new(GatewayConfig::default(), FixedClock::new(now)))
    }

    async fn send(req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = match test_app().oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        let status = resp.status();
        let bytes = match axum::body::to_bytes(resp.into_body(), 64 * 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        let body = match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON: {e}"),
        };
        (status, body)
    }

    fn get_req(uri: &str) -> Request<Body> {
        match Request::builder().uri(uri).body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    fn post_json(uri: &str, json: &str) -> Request<Body> {
        match Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_owned()))
        {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    #[tokio::test]
    async fn health_response_format_returns_ok_with_status_field() {
        let (status, body) = send(get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        assert_eq!(body["service"], "backend-api");
        assert_eq!(body["version"], "1.0.0");
        assert_eq!(body["timestamp"], "2025-10-18T10:00:00.000Z");
        assert!(body.get("environment").is_none(), "/health omits environment");
    }

    #[tokio::test]
    async fn root_includes_message_and_environment() {
        let (status, body) = send(get_req("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Backend API is healthy and running");
        assert_eq!(body["environment"], "development");
    }

    #[tokio::test]
    async fn api_status_reports_environment() {
        let (status, body) = send(get_req("/api/status")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Backend API is running");
        assert_eq!(body["environment"], "development");
        assert_eq!(body["timestamp"], "2025-10-18T10:00:00.000Z");
    }

    #[tokio::test]
    async fn create_user_uses_clock_for_id_and_timestamp() {
        let (status, body) = send(post_json("/api/users", r#"{"name":"A","email":"a@x.com"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], NOW_MILLIS);
        assert_eq!(body["created_at"], "2025-10-18T10:00:00.000Z");
    }

    #[tokio::test]
    async fn create_user_with_empty_name_is_rejected() {
        let (status, body) = send(post_json("/api/users", r#"{"name":"","email":"a@x.com"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "Name and email are required"}));
    }

    #[tokio::test]
    async fn malformed_json_is_a_500_with_detail_in_development() {
        let (status, body) = send(post_json("/api/users", "{not json")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Something went wrong!");
        let message = body["message"].as_str().unwrap_or_default();
        assert!(!message.is_empty(), "decoder detail expected: {body}");
        assert_ne!(message, "Internal Server Error", "development shows the detail");
    }

    #[tokio::test]
    async fn json_array_body_is_missing_fields() {
        let (status, body) = send(post_json("/api/users", r#"[{"name":"A","email":"a@x.com"}]"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "Name and email are required"}));
    }

    #[tokio::test]
    async fn unsupported_method_on_known_path_is_not_found() {
        let req = match Request::builder().method("DELETE").uri("/api/users").body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({"error": "Route not found"}));

        let (status, _) = send(post_json("/health", "{}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
