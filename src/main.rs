//! CORS relay.
//!
//! ```text
//!   browser ── GET /https://cdn.example/video.mpd ──▶ relay ── GET https://cdn.example/video.mpd ──▶ origin
//!           ◀── 200, Access-Control-Allow-Origin: * ──     ◀── 200, restrictive headers ──────────
//! ```
//!
//! Usage: `cors-relay [--config relay.toml] [--bind 0.0.0.0:8080] [--log-level debug]`

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use cors_relay::config::{load_config, validate_config, ConfigError, RelayConfig};
use cors_relay::lifecycle::{shutdown_signal, Shutdown};
use cors_relay::observability::init_logging;
use cors_relay::HttpServer;

#[derive(Parser)]
#[command(name = "cors-relay")]
#[command(about = "Relay requests to the URL in the path with CORS relaxed", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overrides `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Log level, overrides `observability.log_level`.
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability)?;

    let server = HttpServer::new(config)?;
    tracing::info!(
        bind_address = %server.config().listener.bind_address,
        max_redirects = server.config().upstream.max_redirects,
        "cors-relay v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let mut serve = tokio::spawn(server.run(listener, server_shutdown));

    tokio::select! {
        result = &mut serve => result??,
        _ = shutdown_signal() => {
            shutdown.trigger();
            serve.await??;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
