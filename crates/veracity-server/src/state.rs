//! Shared application state

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::{info, warn};
use veracity_classifiers::{ModelContext, Predictor};

use crate::config::ServiceConfig;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServiceConfig>,

    /// Predictor over the read-only model context
    pub predictor: Arc<Predictor>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Initialize application state, loading model artifacts from configuration.
    ///
    /// A failed load leaves the service running without a model.
    pub fn new(config: ServiceConfig, metrics_handle: PrometheusHandle) -> Self {
        let context = ModelContext::load_or_unloaded(&config.model);
        if context.is_loaded() {
            info!("Model status: {}", context.status());
        } else {
            warn!("Starting without a model; /predict will answer 503 until artifacts are fixed");
        }

        Self::with_context(config, context, metrics_handle)
    }

    /// Build state around an already constructed model context
    pub fn with_context(
        config: ServiceConfig,
        context: ModelContext,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        Self {
            config: Arc::new(config),
            predictor: Arc::new(Predictor::new(context)),
            metrics_handle,
        }
    }
}
