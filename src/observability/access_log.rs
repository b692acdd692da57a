//! Per-request access log
//!
//! One line per request:
//! `<method> <uri> <status> <content-length> - <latency> ms <body>`
//! where `<body>` is the request body re-serialized as compact JSON.

use std::time::Instant;

use axum::body::{Body, Bytes, HttpBody};
use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Largest request body the access log will buffer. Matches axum's default
/// JSON body limit.
pub const MAX_LOGGED_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Axum middleware; install with `axum::middleware::from_fn(access_log)`.
pub async fn access_log(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_LOGGED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(%method, %uri, "request body rejected: {}", e);
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };
    let logged_body = render_body(&bytes);

    let response = next
        .run(Request::from_parts(parts, Body::from(bytes)))
        .await;

    let length = response_length(&response);
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    tracing::info!(
        target: "phonebook::access",
        "{} {} {} {} - {:.3} ms {}",
        method,
        uri,
        response.status().as_u16(),
        length,
        elapsed_ms,
        logged_body
    );

    response
}

/// The response's `Content-Length` header, or the body's exact size when
/// the header has not been set yet. `-` when neither is known.
pub fn response_length(response: &Response) -> String {
    if let Some(length) = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
    {
        return length.to_string();
    }

    response
        .body()
        .size_hint()
        .exact()
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Renders a request body for the log line.
///
/// JSON is re-serialized compactly, an empty body is `{}`, and anything
/// else is logged lossily as text.
pub fn render_body(bytes: &Bytes) -> String {
    if bytes.is_empty() {
        return "{}".to_string();
    }
    match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(value) => value.to_string(),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}
