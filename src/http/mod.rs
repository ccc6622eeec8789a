//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing)
//!     → [OPTIONS] response.rs preflight, no fetch
//!     → request.rs (target candidate → TargetDescriptor)
//!     → headers.rs (outbound header ops)
//!     → upstream client (single fetch, redirects followed)
//!     → headers.rs (response header ops) + response.rs (streamed body)
//!     → Send to client
//! ```

pub mod headers;
pub mod request;
pub mod response;
pub mod server;

pub use request::TargetDescriptor;
pub use server::HttpServer;
