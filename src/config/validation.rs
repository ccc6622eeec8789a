//! Configuration validation.
//!
//! Serde handles the syntax; this checks values that parse but cannot work.
//! All errors are collected, not just the first.

use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::HeaderValue;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

use crate::config::schema::RelayConfig;

/// Upper bound for `upstream.max_redirects`.
pub const MAX_REDIRECT_CAP: usize = 50;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    InvalidBindAddress(String),

    #[error("upstream.max_redirects {0} exceeds the cap of {MAX_REDIRECT_CAP}")]
    TooManyRedirects(usize),

    #[error("upstream.user_agent `{0}` is not a valid header value")]
    InvalidUserAgent(String),

    #[error("observability.log_level `{0}` is not a log level")]
    InvalidLogLevel(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.upstream.max_redirects > MAX_REDIRECT_CAP {
        errors.push(ValidationError::TooManyRedirects(config.upstream.max_redirects));
    }

    if !config.upstream.user_agent.is_empty()
        && HeaderValue::from_str(&config.upstream.user_agent).is_err()
    {
        errors.push(ValidationError::InvalidUserAgent(
            config.upstream.user_agent.clone(),
        ));
    }

    if LevelFilter::from_str(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
