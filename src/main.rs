//! Tag suggestion service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request            ┌──────────────────────────────────────────────┐
//!     ──────────────────────────┼─▶ request id → CORS → trace → body limit     │
//!                               │        │                                     │
//!                               │        ├── GET  /healthcheck ─▶ {"status":"ok"}
//!                               │        │                                     │
//!                               │        └── POST /suggest-tags                │
//!                               │               │                              │
//!                               │               ▼                              │
//!                               │         ┌───────────┐   401 on any failure   │
//!                               │         │ auth gate │───────────────────────▶│
//!                               │         └─────┬─────┘                        │
//!                               │               ▼                              │
//!                               │         ┌───────────┐   400 missing fields   │
//!                               │         │  handler  │───────────────────────▶│
//!                               │         └─────┬─────┘                        │
//!                               │               ▼                              │
//!                               │      ┌─────────────────┐    ┌────────────┐  │
//!     Client Response           │      │ tag suggestion  │───▶│   Ollama   │──┼──▶ LLM runtime
//!     ◀─────────────────────────┼──────│    service      │◀───│   client   │  │
//!                               │      └─────────────────┘    └────────────┘  │
//!                               └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use tag_suggester::config::{load_config, ConfigError, ObservabilityConfig};
use tag_suggester::http::HttpServer;
use tag_suggester::lifecycle::Shutdown;
use tag_suggester::observability::{init_metrics, init_tracing};

#[derive(Parser)]
#[command(name = "tag-suggester")]
#[command(about = "Suggests product tags with a local language model", long_about = None)]
struct Args {
    /// Path to a TOML config file (default: ./tag-suggester.toml if present).
    #[arg(short, long, env = "TAGGER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let loaded = load_config(args.config.as_deref());
    let observability = loaded
        .as_ref()
        .map(|c| c.observability.clone())
        .unwrap_or_else(|_| ObservabilityConfig::default());
    init_tracing(&observability);

    let config = match loaded {
        Ok(config) => config,
        Err(ConfigError::Validation(errors)) => {
            for error in &errors {
                tracing::error!(error = %error, "Invalid configuration");
            }
            return Err(ConfigError::Validation(errors).into());
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    tracing::info!("tag-suggester v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        model = %config.model.model,
        legacy_validation_status = config.http.legacy_validation_status,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // validated at load time
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
