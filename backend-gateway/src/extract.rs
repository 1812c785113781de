//! Request body decoding for the create-user endpoint.
//!
//! JSON and URL-encoded form bodies are decoded; any other (or missing)
//! content type yields an empty payload, which then fails validation.
//! A JSON body must be an object or an array; only an object can carry
//! the user fields.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
    Form,
};
use backend_core::NewUser;
use serde_json::{Map, Value};

use crate::error::GatewayError;

/// Body encodings accepted by [`UserPayload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    Form,
    Unsupported,
}

impl BodyKind {
    /// Classifies a request by its `Content-Type` header.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(content_type) = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        else {
            return Self::Unsupported;
        };
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json")) {
            Self::Json
        } else if mime == "application/x-www-form-urlencoded" {
            Self::Form
        } else {
            Self::Unsupported
        }
    }
}

/// A decoded, not yet validated, create-user payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPayload(pub NewUser);

impl<S> FromRequest<S> for UserPayload
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match BodyKind::from_headers(req.headers()) {
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state).await?;
                Ok(Self(decode_json_user(&bytes)?))
            }
            BodyKind::Form => {
                let Form(user) = Form::<NewUser>::from_request(req, state).await?;
                Ok(Self(user))
            }
            BodyKind::Unsupported => Ok(Self(NewUser::default())),
        }
    }
}

/// Decodes a JSON create-user body.
///
/// A zero-length body is an empty payload. Arrays decode to an empty payload
/// too; fields that are not strings are treated as absent.
///
/// # Errors
/// Returns [`GatewayError::Internal`] if the bytes are not JSON, or if the
/// top-level value is neither an object nor an array.
pub fn decode_json_user(bytes: &[u8]) -> Result<NewUser, GatewayError> {
    if bytes.is_empty() {
        return Ok(NewUser::default());
    }
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(fields) => Ok(NewUser {
            name: string_field(&fields, "name"),
            email: string_field(&fields, "email"),
        }),
        Value::Array(_) => Ok(NewUser::default()),
        other => Err(GatewayError::Internal(format!(
            "request body must be a JSON object or array, got {}",
            json_kind(&other)
        ))),
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::HeaderValue};

    use super::*;

    fn headers_with(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = axum::http::Request::builder().method("POST").uri("/api/users");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        match builder.body(Body::from(body)) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        }
    }

    #[test]
    fn content_type_classification() {
        assert_eq!(BodyKind::from_headers(&headers_with("application/json")), BodyKind::Json);
        assert_eq!(
            BodyKind::from_headers(&headers_with("application/json; charset=utf-8")),
            BodyKind::Json
        );
        assert_eq!(BodyKind::from_headers(&headers_with("application/merge-patch+json")), BodyKind::Json);
        assert_eq!(
            BodyKind::from_headers(&headers_with("application/x-www-form-urlencoded")),
            BodyKind::Form
        );
        assert_eq!(BodyKind::from_headers(&headers_with("text/plain")), BodyKind::Unsupported);
        assert_eq!(BodyKind::from_headers(&HeaderMap::new()), BodyKind::Unsupported);
    }

    #[tokio::test]
    async fn json_body_is_decoded() {
        let req = request(Some("application/json"), r#"{"name":"A","email":"a@x.com"}"#);
        let UserPayload(user) = match UserPayload::from_request(req, &()).await {
            Ok(p) => p,
            Err(e) => panic!("unexpected rejection: {e}"),
        };
        assert_eq!(user.name.as_deref(), Some("A"));
        assert_eq!(user.email.as_deref(), Some("a@x.com"));
    }

    #[tokio::test]
    async fn form_body_is_decoded() {
        let req = request(Some("application/x-www-form-urlencoded"), "name=A&email=a%40x.com");
        let UserPayload(user) = match UserPayload::from_request(req, &()).await {
            Ok(p) => p,
            Err(e) => panic!("unexpected rejection: {e}"),
        };
        assert_eq!(user.email.as_deref(), Some("a@x.com"));
    }

    #[tokio::test]
    async fn empty_json_body_is_an_empty_payload() {
        let req = request(Some("application/json"), "");
        let payload = match UserPayload::from_request(req, &()).await {
            Ok(p) => p,
            Err(e) => panic!("unexpected rejection: {e}"),
        };
        assert_eq!(payload, UserPayload(NewUser::default()));
    }

    #[tokio::test]
    async fn unknown_content_type_is_an_empty_payload() {
        let req = request(Some("text/plain"), "name=A&email=a@x.com");
        let payload = match UserPayload::from_request(req, &()).await {
            Ok(p) => p,
            Err(e) => panic!("unexpected rejection: {e}"),
        };
        assert_eq!(payload, UserPayload(NewUser::default()));
    }

    #[tokio::test]
    async fn malformed_json_is_an_internal_failure() {
        let req = request(Some("application/json"), r#"{"name": "A",}"#);
        match UserPayload::from_request(req, &()).await {
            Err(GatewayError::Internal(detail)) => assert!(!detail.is_empty()),
            other => panic!("expected Internal, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn array_body_carries_no_fields() {
        let req = request(Some("application/json"), r#"["A","a@x.com"]"#);
        let payload = match UserPayload::from_request(req, &()).await {
            Ok(p) => p,
            Err(e) => panic!("unexpected rejection: {e}"),
        };
        assert_eq!(payload, UserPayload(NewUser::default()));
    }

    #[test]
    fn primitive_top_level_values_are_rejected() {
        for body in ["null", "5", "true", r#""A""#] {
            match decode_json_user(body.as_bytes()) {
                Err(GatewayError::Internal(detail)) => {
                    assert!(detail.contains("object or array"), "unexpected detail {detail:?}");
                }
                other => panic!("body {body} must be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn whitespace_only_body_is_not_empty() {
        assert!(matches!(decode_json_user(b"  \n"), Err(GatewayError::Internal(_))));
        assert_eq!(decode_json_user(b"").ok(), Some(NewUser::default()));
    }

    #[test]
    fn non_string_fields_count_as_absent() {
        let user = match decode_json_user(br#"{"name": 5, "email": "a@x.com"}"#) {
            Ok(u) => u,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(user.name, None);
        assert_eq!(user.email.as_deref(), Some("a@x.com"));
    }
}
