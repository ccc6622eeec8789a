//! Header rewriting for both legs of a relay.
//!
//! A rewrite is a copy of the source map followed by a fixed, ordered list of
//! [`HeaderOp`]s. The source map is never touched.

use axum::http::{
    header::{self, HeaderName},
    HeaderMap, HeaderValue,
};

use crate::error::RelayError;
use crate::http::request::TargetDescriptor;

/// Methods advertised to browsers on every relayed response.
pub const ALLOWED_METHODS: &str = "GET, HEAD, POST, OPTIONS";

/// Headers that describe one connection and must not cross the relay.
pub const HOP_BY_HOP: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-connection",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// A single edit applied to a copied header map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderOp {
    /// Replace every value of the header with one value.
    Set(HeaderName, HeaderValue),
    /// Drop every value of the header.
    Remove(HeaderName),
}

/// Copy `source` and apply `ops` in order.
pub fn rewrite(source: &HeaderMap, ops: &[HeaderOp]) -> HeaderMap {
    let mut headers = source.clone();
    for op in ops {
        match op {
            HeaderOp::Set(name, value) => {
                headers.insert(name.clone(), value.clone());
            }
            HeaderOp::Remove(name) => {
                headers.remove(name);
            }
        }
    }
    headers
}

fn strip_hop_by_hop() -> impl Iterator<Item = HeaderOp> {
    HOP_BY_HOP
        .into_iter()
        .map(|name| HeaderOp::Remove(HeaderName::from_static(name)))
}

/// Edits for the request sent to the target.
///
/// Origin and Referer pretend the request came from the target itself; Host
/// is left for the client to derive from the target URL.
pub fn outbound_request_ops(
    target: &TargetDescriptor,
    user_agent: Option<&HeaderValue>,
) -> Result<Vec<HeaderOp>, RelayError> {
    let origin = target.origin();
    let origin = HeaderValue::from_str(&origin)
        .map_err(|e| RelayError::malformed(target.as_str(), e))?;

    let mut ops = vec![
        HeaderOp::Set(header::ORIGIN, origin.clone()),
        HeaderOp::Set(header::REFERER, origin),
        HeaderOp::Remove(header::HOST),
    ];
    if let Some(agent) = user_agent {
        ops.push(HeaderOp::Set(header::USER_AGENT, agent.clone()));
    }
    ops.extend(strip_hop_by_hop());
    Ok(ops)
}

/// Edits for the response handed back to the caller.
pub fn relayed_response_ops() -> Vec<HeaderOp> {
    let mut ops = vec![
        HeaderOp::Set(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ),
        HeaderOp::Set(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ),
        HeaderOp::Set(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("*"),
        ),
        HeaderOp::Remove(header::X_FRAME_OPTIONS),
        HeaderOp::Remove(header::CONTENT_SECURITY_POLICY),
    ];
    ops.extend(strip_hop_by_hop());
    ops
}
