//! Claim Adjudicator - API Server Binary
//!
//! This binary starts the HTTP API server for medical claim adjudication.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration (pattern extraction only)
//! cargo run --bin claims-api
//!
//! # Run with both inference collaborators
//! API_REMOTE_INFERENCE_URL=https://... API_REMOTE_INFERENCE_TOKEN=... \
//! API_LOCAL_QA_URL=http://127.0.0.1:8500/qa cargo run --bin claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_REMOTE_INFERENCE_URL` - Hosted text-generation endpoint (optional)
//! * `API_REMOTE_INFERENCE_TOKEN` - Bearer token for that endpoint (optional)
//! * `API_REMOTE_TIMEOUT_SECS` - Remote call timeout (default: 30)
//! * `API_LOCAL_QA_URL` - On-host question-answering endpoint (optional)
//! * `API_LOCAL_TIMEOUT_SECS` - Local call timeout (default: 60)
//! * `API_MIN_CONFIDENCE` - Minimum local answer score (default: 0.3)
//! * `API_EXCERPT_CHARS` - Bill characters sent to the hosted endpoint (default: 2000)
//! * `API_TOLERANCE_FLOOR` / `API_TOLERANCE_RATE` - Amount tolerance (default: 1.0 / 0.01)
//! * `API_EXCLUSIONS` - Comma-separated exclusion list (default: standard list)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use domain_claims::adapters::{
    HostedInferenceAdapter, HostedInferenceConfig, LocalQaAdapter, LocalQaConfig,
};
use domain_claims::adjudication::DecisionEngine;
use domain_claims::extraction::ExtractionPatterns;
use domain_claims::resolver::BillInfoResolver;
use domain_claims::service::ClaimAdjudicator;
use interface_api::{config::ApiConfig, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, wires the inference
/// collaborators and starts the HTTP server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config()?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        remote_inference = config.remote_inference_url.is_some(),
        local_qa = config.local_qa_url.is_some(),
        "Starting Claim Adjudicator API Server"
    );

    let adjudicator = build_adjudicator(&config)?;
    let app = create_router(Arc::new(adjudicator), config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Any malformed `API_*` variable aborts startup.
fn load_config() -> anyhow::Result<ApiConfig> {
    ApiConfig::from_env().context("invalid API_* configuration")
}

/// Builds the adjudicator, enabling each collaborator whose URL is configured
fn build_adjudicator(config: &ApiConfig) -> anyhow::Result<ClaimAdjudicator> {
    let mut resolver = BillInfoResolver::new(
        Arc::new(ExtractionPatterns::new()),
        config.resolver_settings(),
    );

    if let Some(url) = &config.remote_inference_url {
        let adapter = HostedInferenceAdapter::new(HostedInferenceConfig {
            endpoint_url: url.clone(),
            api_token: config.remote_inference_token.clone(),
            timeout_secs: config.remote_timeout_secs,
        })
        .context("failed to create hosted inference adapter")?;
        resolver = resolver.with_remote(Arc::new(adapter));
    }

    if let Some(url) = &config.local_qa_url {
        let adapter = LocalQaAdapter::new(LocalQaConfig {
            endpoint_url: url.clone(),
            timeout_secs: config.local_timeout_secs,
        })
        .context("failed to create local QA adapter")?;
        resolver = resolver.with_local(Arc::new(adapter));
    }

    let engine = DecisionEngine::new(Arc::new(config.exclusion_list()), config.tolerance_policy());
    Ok(ClaimAdjudicator::new(resolver, engine))
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
