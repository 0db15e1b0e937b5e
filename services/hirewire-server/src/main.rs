//! HireWire Server
//!
//! Serves the coordinating agent over HTTP: job intake on `/manager` and
//! `/process`, the specialist directory on `/registry`, and each specialist
//! type on `/specialist/:type`.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings
//! hirewire-server
//!
//! # Start with custom config
//! hirewire-server --config /path/to/config.toml
//!
//! # Start with environment overrides
//! HIREWIRE__SERVER__PORT=8080 HIREWIRE_LLM_PROVIDER=openai hirewire-server
//! ```

mod config;

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hirewire_agents::{AgentBrain, CoordinatorAgent};
use hirewire_api::{create_router, ApiConfig, AppState};
use hirewire_llm::LLMRouter;
use hirewire_marketplace::StaticDirectory;

use crate::config::ServerConfig;

// =============================================================================
// CLI Arguments
// =============================================================================

/// HireWire Server - marketplace coordinator for specialist agents
#[derive(Parser, Debug)]
#[command(name = "hirewire-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML, JSON, or YAML)
    #[arg(short, long, env = "HIREWIRE_CONFIG")]
    config: Option<String>,

    /// Host to bind to
    #[arg(long, env = "HIREWIRE_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "HIREWIRE_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "HIREWIRE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, env = "HIREWIRE_LOG_FORMAT")]
    log_format: Option<String>,

    /// Text-generation provider (gemini, openai, anthropic, ollama, openai_compat, deterministic)
    #[arg(long, env = "HIREWIRE_LLM_PROVIDER")]
    llm_provider: Option<String>,

    /// Base URL for the seeded specialist endpoints
    #[arg(long, env = "HIREWIRE_SPECIALIST_BASE_URL")]
    specialist_base_url: Option<String>,
}

impl Args {
    fn apply(self, config: &mut ServerConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        if let Some(provider) = self.llm_provider {
            config.llm.provider = Some(provider);
        }
        if let Some(base_url) = self.specialist_base_url {
            config.marketplace.specialist_base_url = base_url;
        }
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut server_config = ServerConfig::load(args.config.as_deref())?;
    args.apply(&mut server_config);

    init_logging(&server_config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting HireWire Server"
    );

    let coordinator = init_coordinator(&server_config)?;
    let state = Arc::new(AppState::new(Arc::new(coordinator)));

    let api_config = ApiConfig {
        enable_cors: server_config.api.enable_cors,
        cors_origins: server_config.api.cors_origins.clone(),
        enable_tracing: server_config.api.enable_tracing,
        max_body_size: server_config.api.max_body_size,
    };

    let app = create_router(state, api_config);

    let listener = tokio::net::TcpListener::bind((
        server_config.server.host.as_str(),
        server_config.server.port,
    ))
    .await?;

    tracing::info!(
        host = %server_config.server.host,
        port = %server_config.server.port,
        "Server listening"
    );

    serve_until_shutdown(listener, app, server_config.server.shutdown_timeout()).await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

// =============================================================================
// Initialization Functions
// =============================================================================

/// Initialize tracing/logging
fn init_logging(config: &config::LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber
                .with(fmt::layer().json().with_target(true))
                .try_init()?;
        }
        _ => {
            subscriber
                .with(fmt::layer().pretty().with_target(true))
                .try_init()?;
        }
    }

    Ok(())
}

/// Build the coordinating agent from configuration
fn init_coordinator(config: &ServerConfig) -> anyhow::Result<CoordinatorAgent> {
    let llm = match config.llm.provider.as_deref() {
        Some(name) => LLMRouter::from_name(name),
        None => LLMRouter::from_env(),
    };
    tracing::info!(provider = %llm.kind(), "Text generation configured");

    let brain = AgentBrain::with_llm(llm).with_config(config.llm.generation());

    let directory = StaticDirectory::seeded(
        &config.marketplace.specialist_base_url,
        &config.marketplace.currency,
    );
    tracing::info!(
        specialists = directory.len(),
        base_url = %config.marketplace.specialist_base_url,
        "Specialist directory loaded"
    );

    Ok(CoordinatorAgent::new(
        Arc::new(brain),
        Arc::new(directory),
        config.marketplace.coordinator()?,
    ))
}

// =============================================================================
// Graceful Shutdown
// =============================================================================

/// Serve until a shutdown signal, then drain for at most `timeout`
async fn serve_until_shutdown(
    listener: tokio::net::TcpListener,
    app: axum::Router,
    timeout: Duration,
) -> anyhow::Result<()> {
    let (signalled_tx, signalled_rx) = tokio::sync::oneshot::channel::<()>();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = signalled_tx.send(());
        })
        .into_future();
    tokio::pin!(server);

    let drain_deadline = async move {
        if signalled_rx.await.is_ok() {
            tracing::info!(
                timeout_secs = timeout.as_secs(),
                "Waiting for in-flight requests to complete..."
            );
            tokio::time::sleep(timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = &mut server => result?,
        _ = drain_deadline => {
            tracing::warn!("Shutdown timeout elapsed, dropping in-flight requests");
        }
    }

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(["hirewire-server", "--port", "8080"]);
        assert_eq!(args.port, Some(8080));
    }

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from([
            "hirewire-server",
            "--host",
            "127.0.0.1",
            "--llm-provider",
            "deterministic",
            "--specialist-base-url",
            "http://specialists.internal",
        ]);

        let mut config = ServerConfig::default();
        args.apply(&mut config);

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8787);
        assert_eq!(config.llm.provider.as_deref(), Some("deterministic"));
        assert_eq!(config.marketplace.specialist_base_url, "http://specialists.internal");
    }

    #[test]
    fn test_init_coordinator_with_deterministic_provider() {
        let mut config = ServerConfig::default();
        config.llm.provider = Some("deterministic".to_string());

        let coordinator = init_coordinator(&config).unwrap();
        assert_eq!(coordinator.brain().config().max_tokens, 8000);
        assert_eq!(
            coordinator.dispatcher().transport_names(),
            vec!["direct", "http", "local"]
        );
    }
}
