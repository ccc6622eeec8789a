//! Inbound request interpretation.
//!
//! # Responsibilities
//! - Turn the inbound path + query into a target URL candidate
//! - Normalize and parse the candidate into a [`TargetDescriptor`]
//! - Work out the relay's own host for the usage hint
//!
//! # Design Decisions
//! - The inbound request is never mutated; callers derive new parts from it
//! - A missing scheme defaults to `https://`
//! - Percent-encoded targets (`https%3A%2F%2F...`, `https:%2F%2F...`) are
//!   decoded before parsing

use std::fmt;

use axum::http::{header, HeaderMap, Uri};
use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::RelayError;

/// The absolute URL an inbound request asks the relay to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    url: Url,
}

impl TargetDescriptor {
    /// Normalize and parse a non-empty target candidate.
    pub fn parse(candidate: &str) -> Result<Self, RelayError> {
        let decoded = decode_encoded_target(candidate)?;

        let absolute = if has_http_scheme(&decoded) {
            decoded
        } else {
            format!("https://{decoded}")
        };

        let url = Url::parse(&absolute).map_err(|e| RelayError::malformed(candidate, e))?;
        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Scheme, host and non-default port, e.g. `https://example.com`.
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }
}

impl fmt::Display for TargetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// The path without its leading `/`, plus the query string when there is one.
pub fn target_candidate(uri: &Uri) -> String {
    let path = uri.path();
    let mut candidate = path.strip_prefix('/').unwrap_or(path).to_string();
    if let Some(query) = uri.query().filter(|q| !q.is_empty()) {
        candidate.push('?');
        candidate.push_str(query);
    }
    candidate
}

/// The host the caller used to reach the relay.
pub fn request_host(uri: &Uri, headers: &HeaderMap) -> String {
    headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_else(|| "localhost".to_string())
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn has_http_scheme(candidate: &str) -> bool {
    starts_with_ignore_case(candidate, "http:") || starts_with_ignore_case(candidate, "https:")
}

/// Decode the path part of a target whose scheme separator (`:` or the
/// slashes after it) arrived encoded.
///
/// The query string is left alone: it was appended verbatim.
fn decode_encoded_target(candidate: &str) -> Result<String, RelayError> {
    let encoded = ["http%3a", "https%3a", "http:%2f", "https:%2f"]
        .iter()
        .any(|prefix| starts_with_ignore_case(candidate, prefix));
    if !encoded {
        return Ok(candidate.to_string());
    }

    let (path, query) = match candidate.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (candidate, None),
    };

    let mut decoded = percent_decode_str(path)
        .decode_utf8()
        .map_err(|e| RelayError::malformed(candidate, e))?
        .into_owned();

    if let Some(query) = query {
        // An encoded target may carry its own `?`; keep the outer query after it.
        decoded.push(if decoded.contains('?') { '&' } else { '?' });
        decoded.push_str(query);
    }
    Ok(decoded)
}
