//! Veracity Server
//!
//! HTTP API for fake news detection. Loads the pre-fitted vectorizer and
//! classifier once at startup and serves predictions, a health check, and
//! Prometheus metrics. A missing or broken model does not stop the server:
//! it starts degraded and reports `"not loaded"` on `/health`.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};

mod config;
mod routes;
mod state;

use config::ServiceConfig;

#[derive(Parser, Debug)]
#[command(name = "veracity-server")]
#[command(about = "Fake news detection API", long_about = None)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml", env = "VERACITY_CONFIG")]
    config: String,

    /// Listen address
    #[arg(short = 'l', long, env = "VERACITY_LISTEN")]
    listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long, env = "VERACITY_PORT")]
    port: Option<u16>,

    /// Vectorizer artifact path
    #[arg(long, env = "VERACITY_VECTORIZER")]
    vectorizer: Option<PathBuf>,

    /// Classifier artifact path
    #[arg(short, long, env = "VERACITY_MODEL")]
    model: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.log_json);

    info!("Starting Veracity Server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = ServiceConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!("Vectorizer: {}", config.model.vectorizer_path.display());
    info!("Classifier: {}", config.model.classifier_path.display());

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Load model artifacts; failure leaves the service degraded, not stopped
    let state = state::AppState::new(config.clone(), metrics_handle);

    let addr: SocketAddr = format!("{}:{}", config.listen, config.port).parse()?;
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            warn!("Shutdown signal received, stopping server...");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool, json: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("veracity_server=debug,veracity_classifiers=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("veracity_server=info,veracity_classifiers=info,tower_http=info")
        })
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "veracity_requests_total",
        "Total number of prediction requests received"
    );
    metrics::describe_counter!(
        "veracity_predictions_total",
        "Predictions served by label and confidence tier"
    );
    metrics::describe_counter!("veracity_errors_total", "Total number of errors by kind");
    metrics::describe_histogram!(
        "veracity_prediction_latency_us",
        metrics::Unit::Microseconds,
        "Prediction latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
