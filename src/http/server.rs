//! HTTP server setup and the relay handler.
//!
//! # Responsibilities
//! - Create the Axum Router with a catch-all relay route
//! - Wire up middleware (tracing, request ID)
//! - Serve on a listener until shutdown is signalled
//! - Translate each inbound request into one outbound fetch

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::http::headers::{outbound_request_ops, rewrite};
use crate::http::request::{request_host, target_candidate, TargetDescriptor};
use crate::http::response::{preflight_response, relay_response, usage_response};
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
///
/// Immutable; nothing here changes between invocations.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let upstream = UpstreamClient::from_config(&config.upstream)?;
        let router = Self::build_router(AppState { upstream });
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(relay_handler))
            .route("/{*path}", any(relay_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The router, for driving the relay without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Relay one request to the URL encoded in its path.
async fn relay_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, RelayError> {
    if request.method() == Method::OPTIONS {
        return Ok(preflight_response(request.headers()));
    }

    let candidate = target_candidate(request.uri());
    if candidate.is_empty() {
        return Ok(usage_response(&request_host(request.uri(), request.headers())));
    }

    let target = TargetDescriptor::parse(&candidate).inspect_err(|e| {
        tracing::debug!(error = %e, "Rejected target");
    })?;

    let (parts, body) = request.into_parts();
    let headers = rewrite(
        &parts.headers,
        &outbound_request_ops(&target, state.upstream.user_agent())?,
    );

    tracing::debug!(method = %parts.method, target_url = %target, "Relaying request");

    let upstream = state
        .upstream
        .dispatch(parts.method, &target, headers, body)
        .await?;

    tracing::debug!(target_url = %target, status = %upstream.status(), "Target responded");
    Ok(relay_response(upstream))
}
