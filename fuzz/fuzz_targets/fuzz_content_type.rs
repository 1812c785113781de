//! Fuzz target: `Content-Type` classification of create-user requests.

#![no_main]

use axum::http::{header, HeaderMap, HeaderValue};
use backend_gateway::extract::BodyKind;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = HeaderValue::from_bytes(data) else {
        return;
    };
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, value);
    let _ = BodyKind::from_headers(&headers);
});
