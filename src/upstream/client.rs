//! Outbound HTTP(S) client used to reach targets.
//!
//! # Responsibilities
//! - Build one pooled client from [`UpstreamConfig`]
//! - Issue a single logical fetch per relay, following redirects
//! - Stream the inbound body out, return the response with its body unread
//!
//! # Design Decisions
//! - No retries: a failure ends the invocation
//! - Timeouts are opt-in; a hanging target hangs until the caller gives up
//! - Dropping the returned response abandons the connection

use std::time::Duration;

use axum::{
    body::{Body, HttpBody},
    http::{HeaderMap, HeaderValue, Method},
};
use reqwest::redirect::Policy;

use crate::config::UpstreamConfig;
use crate::error::RelayError;
use crate::http::request::TargetDescriptor;

/// Shared handle to the outbound connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    user_agent: Option<HeaderValue>,
}

impl UpstreamClient {
    /// Build the client. Fails only if the TLS backend cannot initialize.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let redirect = match config.max_redirects {
            0 => Policy::none(),
            n => Policy::limited(n),
        };

        // Redirect hops keep the spoofed Referer instead of the previous URL.
        let mut builder = reqwest::Client::builder()
            .redirect(redirect)
            .referer(false);
        if config.connect_timeout_secs > 0 {
            builder = builder.connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        }
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        let user_agent = Some(config.user_agent.as_str())
            .filter(|ua| !ua.is_empty())
            .and_then(|ua| HeaderValue::from_str(ua).ok());

        Ok(Self {
            client: builder.build()?,
            user_agent,
        })
    }

    /// Replacement User-Agent for outbound requests, if configured.
    pub fn user_agent(&self) -> Option<&HeaderValue> {
        self.user_agent.as_ref()
    }

    /// Send one request to `target` and wait for its response head.
    ///
    /// Any inbound body is streamed through, whatever the method. An empty
    /// one is not attached so body-less requests keep their plain framing.
    pub async fn dispatch(
        &self,
        method: Method,
        target: &TargetDescriptor,
        headers: HeaderMap,
        body: Body,
    ) -> Result<reqwest::Response, RelayError> {
        let mut request = self
            .client
            .request(method, target.url().clone())
            .headers(headers);

        if !HttpBody::is_end_stream(&body) {
            request = request.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }

        request.send().await.map_err(|e| {
            tracing::warn!(target_url = %target, error = %e, "Upstream fetch failed");
            RelayError::upstream(&e)
        })
    }
}
