//! Responses produced by the relay.
//!
//! # Responsibilities
//! - Answer CORS preflight without touching the target
//! - Answer the bare root with a usage hint
//! - Turn a target response into the caller's response
//!
//! # Design Decisions
//! - Target bodies are streamed, never buffered
//! - Status and headers are carried over, then rewritten by a fixed op list

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::headers::{relayed_response_ops, rewrite, ALLOWED_METHODS};

/// Example target shown in the usage hint.
pub const USAGE_EXAMPLE_TARGET: &str = "https://target-url.com/stream.mpd";

/// Preflight answer; echoes the requested headers back as allowed.
pub fn preflight_response(request_headers: &HeaderMap) -> Response {
    let allow_headers = request_headers
        .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("*"));

    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOWED_METHODS),
            ),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, allow_headers),
        ],
    )
        .into_response()
}

pub fn usage_text(host: &str) -> String {
    format!("Usage: https://{host}/{USAGE_EXAMPLE_TARGET}")
}

/// Informational answer for an empty target. Deliberately 200, not 400.
pub fn usage_response(host: &str) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain")],
        usage_text(host),
    )
        .into_response()
}

/// Wrap a target response for the caller, streaming its body through.
pub fn relay_response(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let headers = rewrite(upstream.headers(), &relayed_response_ops());

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
