//! HTTP routes and handlers

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::error::Error as _;
use std::time::Instant;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, error, info};
use veracity_core::{Article, Error, PredictionResult};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/predict", post(predict))
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Fake News Detection API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/predict": "POST - Predict if news is fake or real",
            "/health": "GET - Health check",
        }
    }))
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "model_status": state.predictor.context().status(),
    }))
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

/// Classify one article
async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Article>, JsonRejection>,
) -> Result<Json<PredictionResult>, AppError> {
    metrics::counter!("veracity_requests_total").increment(1);

    let Json(article) = payload.map_err(|rejection| {
        metrics::counter!("veracity_errors_total", "kind" => "validation").increment(1);
        AppError::Rejected(rejection.status(), rejection.body_text())
    })?;

    if let Err(e) = article.validate() {
        metrics::counter!("veracity_errors_total", "kind" => e.kind()).increment(1);
        return Err(e.into());
    }

    debug!(
        title_chars = article.title.chars().count(),
        text_chars = article.text.chars().count(),
        "Received prediction request"
    );

    let predictor = state.predictor.clone();
    let start = Instant::now();

    // Backend panics surface as a JoinError instead of killing the connection
    let outcome = match tokio::task::spawn_blocking(move || predictor.predict(&article)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Prediction task aborted: {}", e);
            Err(Error::prediction_failed(Error::internal(
                "prediction task failed",
            )))
        }
    };

    let latency_us = start.elapsed().as_micros() as u64;
    metrics::histogram!("veracity_prediction_latency_us").record(latency_us as f64);

    match outcome {
        Ok(result) => {
            metrics::counter!(
                "veracity_predictions_total",
                "label" => result.label.as_str(),
                "confidence" => result.confidence.as_str()
            )
            .increment(1);
            info!(
                label = %result.label,
                probability = result.probability,
                confidence = %result.confidence,
                latency_us,
                "Prediction served"
            );
            Ok(Json(result))
        }
        Err(e) => {
            metrics::counter!("veracity_errors_total", "kind" => e.kind()).increment(1);
            match e.source() {
                Some(cause) => error!("Prediction error: {} (cause: {})", e, cause),
                None => error!("Prediction error: {}", e),
            }
            Err(e.into())
        }
    }
}

async fn fallback() -> AppError {
    AppError::NotFound
}

/// Error handling
#[derive(Debug)]
enum AppError {
    /// Body could not be read or decoded; keeps the extractor's status
    Rejected(StatusCode, String),
    InvalidRequest(String),
    ModelUnavailable,
    PredictionFailed(String),
    NotFound,
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(msg) => AppError::InvalidRequest(msg),
            Error::ModelUnavailable(_) => AppError::ModelUnavailable,
            Error::PredictionFailed { source } => AppError::PredictionFailed(source.to_string()),
            other => AppError::PredictionFailed(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Rejected(status, msg) => (status, msg),
            AppError::InvalidRequest(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::ModelUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Model not available. Please ensure the model files are present.".to_string(),
            ),
            AppError::PredictionFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error processing prediction: {msg}"),
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not Found".to_string()),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::Arc;
    use tower::ServiceExt;
    use veracity_classifiers::{ClassPrediction, Classifier, CsVec, ModelContext, Vectorizer};

    const BODY_TEXT: &str = "The city council met on Tuesday evening to review the annual budget.";

    struct StubVectorizer;

    impl Vectorizer for StubVectorizer {
        fn vectorize(&self, _text: &str) -> veracity_core::Result<CsVec<f64>> {
            Ok(CsVec::new(2, vec![0], vec![1.0]))
        }

        fn num_features(&self) -> usize {
            2
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    enum StubBehavior {
        Fixed(usize, Vec<f64>),
        Fail,
        Panic,
    }

    struct StubClassifier(StubBehavior);

    impl Classifier for StubClassifier {
        fn predict(&self, _input: &CsVec<f64>) -> veracity_core::Result<ClassPrediction> {
            match &self.0 {
                StubBehavior::Fixed(class, probs) => Ok(ClassPrediction::new(*class, probs.clone())),
                StubBehavior::Fail => Err(Error::classifier("weights corrupted")),
                StubBehavior::Panic => panic!("backend blew up"),
            }
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn app(context: ModelContext) -> Router {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        create_router(AppState::with_context(
            ServiceConfig::default(),
            context,
            handle,
        ))
    }

    fn loaded(behavior: StubBehavior) -> Router {
        app(ModelContext::new(
            Arc::new(StubVectorizer),
            Arc::new(StubClassifier(behavior)),
        ))
    }

    fn predict_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn article_json(title: &str, text: &str, source: &str) -> serde_json::Value {
        json!({ "title": title, "text": text, "source": source })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_model_status() {
        let (status, body) = send(loaded(StubBehavior::Fixed(0, vec![0.9, 0.1])), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "healthy", "model_status": "loaded" }));

        let (status, body) = send(app(ModelContext::unloaded()), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model_status"], "not loaded");
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let (status, body) = send(app(ModelContext::unloaded()), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Fake News Detection API");
        assert!(body["endpoints"]["/predict"].is_string());
    }

    #[tokio::test]
    async fn test_predict_success() {
        let app = loaded(StubBehavior::Fixed(1, vec![0.12344, 0.87656]));
        let request = predict_request(article_json(
            "SHOCKING: You won't believe this!",
            BODY_TEXT,
            "randomsite.biz",
        ));

        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["label"], "Fake");
        assert_eq!(body["probability"], 0.8766);
        assert_eq!(body["confidence"], "High");
        assert!(body["explanation"]
            .as_str()
            .unwrap()
            .contains("sensational language in title"));
        assert_eq!(body["features"]["source"], "randomsite.biz");
        assert_eq!(body["features"]["has_sensational_title"], true);
        assert_eq!(body["features"]["title_all_caps"], false);
        assert_eq!(body["features"]["word_count"], 12);
    }

    #[tokio::test]
    async fn test_predict_rejects_short_text() {
        let app = loaded(StubBehavior::Fixed(0, vec![0.9, 0.1]));
        let (status, body) = send(app, predict_request(article_json("Title", "short", "a.com"))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("text"));
    }

    #[tokio::test]
    async fn test_predict_rejects_missing_field() {
        let app = loaded(StubBehavior::Fixed(0, vec![0.9, 0.1]));
        let request = predict_request(json!({ "title": "Title", "text": BODY_TEXT }));

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_predict_without_model_is_unavailable() {
        let app = app(ModelContext::unloaded());
        let (status, body) =
            send(app, predict_request(article_json("Title", BODY_TEXT, "a.com"))).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body["detail"],
            "Model not available. Please ensure the model files are present."
        );
    }

    #[tokio::test]
    async fn test_predict_validation_precedes_model_check() {
        let app = app(ModelContext::unloaded());
        let (status, _) = send(app, predict_request(article_json("", BODY_TEXT, "a.com"))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_predict_backend_error_is_internal() {
        let app = loaded(StubBehavior::Fail);
        let (status, body) =
            send(app, predict_request(article_json("Title", BODY_TEXT, "a.com"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["detail"],
            "Error processing prediction: classifier error: weights corrupted"
        );
    }

    #[tokio::test]
    async fn test_predict_backend_panic_is_internal() {
        let app = loaded(StubBehavior::Panic);
        let (status, body) =
            send(app, predict_request(article_json("Title", BODY_TEXT, "a.com"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["detail"],
            "Error processing prediction: internal error: prediction task failed"
        );
        assert!(!body["detail"].as_str().unwrap().contains("blew up"));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let app = loaded(StubBehavior::Fixed(0, vec![0.9, 0.1]));
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, body) = send(app(ModelContext::unloaded()), get("/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Not Found");
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let app = app(ModelContext::unloaded());
        let response = app.oneshot(get("/metrics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
