//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handler + middleware
//!     → tracing events and per-request spans (tower-http TraceLayer)
//!     → logging.rs subscriber (pretty or JSON, stdout)
//! ```
//!
//! # Design Decisions
//! - Request ID (`x-request-id`) set on every request and echoed back
//! - Target URL and outcome logged per relay

pub mod logging;

pub use logging::init_logging;
