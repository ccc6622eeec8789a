//! Error types surfaced to callers of the relay.

use std::error::Error as StdError;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Every way a single relay invocation can fail.
///
/// Both variants become a complete response; nothing escapes to the server.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The target candidate did not parse as an absolute http(s) URL.
    #[error("Invalid target URL `{candidate}`: {reason}")]
    MalformedTarget { candidate: String, reason: String },

    /// Contacting or reading from the target failed.
    #[error("Proxy Error: {0}")]
    UpstreamFetch(String),
}

impl RelayError {
    pub fn malformed(candidate: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedTarget {
            candidate: candidate.into(),
            reason: reason.to_string(),
        }
    }

    /// Build an upstream failure from an error and its whole source chain.
    ///
    /// Transport errors bury the useful part ("connection refused",
    /// "dns error") a few sources deep.
    pub fn upstream(err: &(dyn StdError + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        Self::UpstreamFetch(message)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedTarget { .. } => StatusCode::BAD_REQUEST,
            Self::UpstreamFetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}
