//! Upstream (target origin) access.
//!
//! # Data Flow
//! ```text
//! relay handler
//!     → client.rs (one reqwest fetch, redirects followed)
//!     → reqwest::Response (head read, body still on the wire)
//!     → http::response (rewritten headers, streamed body)
//! ```

pub mod client;

pub use client::UpstreamClient;
