//! CORS relay library.
//!
//! Forwards a request to the URL encoded in its path and hands the target's
//! response back with cross-origin restrictions relaxed.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::RelayConfig;
pub use error::RelayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
