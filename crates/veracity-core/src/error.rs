//! Error types for Veracity

/// Result type alias using Veracity's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Veracity operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Article failed field validation; never reaches the predictor
    #[error("validation error: {0}")]
    Validation(String),

    /// Vectorizer or classifier is not loaded
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// Any failure while producing a prediction; the cause is kept for logs
    #[error("prediction failed: {source}")]
    PredictionFailed {
        #[source]
        source: Box<Error>,
    },

    /// Vectorizer execution errors
    #[error("vectorizer error: {0}")]
    Vectorizer(String),

    /// Classifier execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Model artifact is malformed or inconsistent
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new model-unavailable error
    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    /// Wrap an error raised while predicting; an existing wrapper is kept as is
    pub fn prediction_failed(source: Error) -> Self {
        match source {
            Self::PredictionFailed { .. } => source,
            other => Self::PredictionFailed {
                source: Box::new(other),
            },
        }
    }

    /// Create a new vectorizer error
    pub fn vectorizer(msg: impl Into<String>) -> Self {
        Self::Vectorizer(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new artifact error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Short error kind, used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::ModelUnavailable(_) => "model_unavailable",
            Self::PredictionFailed { .. } => "prediction_failed",
            Self::Vectorizer(_) => "vectorizer",
            Self::Classifier(_) => "classifier",
            Self::Artifact(_) => "artifact",
            Self::Serialization(_) => "serialization",
            Self::Internal(_) => "internal",
        }
    }
}
