//! Loading model artifacts into an immutable context

use crate::classifier::Classifier;
use crate::logistic::LogisticRegression;
use crate::tfidf::TfidfVectorizer;
use crate::vectorizer::Vectorizer;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use veracity_core::{Error, Result};

/// Locations of the fitted artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelPaths {
    /// TF-IDF vectorizer artifact (JSON)
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: PathBuf,

    /// Logistic regression artifact (JSON)
    #[serde(default = "default_classifier_path")]
    pub classifier_path: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            vectorizer_path: default_vectorizer_path(),
            classifier_path: default_classifier_path(),
        }
    }
}

fn default_vectorizer_path() -> PathBuf {
    PathBuf::from("models/vectorizer.json")
}

fn default_classifier_path() -> PathBuf {
    PathBuf::from("models/fake_news_model.json")
}

/// Read-only vectorizer/classifier pair shared by all requests.
///
/// Built once at startup and never mutated. Either half may be missing, in
/// which case predictions fail with `ModelUnavailable` while the rest of the
/// service keeps answering.
#[derive(Clone, Default)]
pub struct ModelContext {
    vectorizer: Option<Arc<dyn Vectorizer>>,
    classifier: Option<Arc<dyn Classifier>>,
}

impl ModelContext {
    /// Context with both halves present
    pub fn new(vectorizer: Arc<dyn Vectorizer>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            vectorizer: Some(vectorizer),
            classifier: Some(classifier),
        }
    }

    /// Context with nothing loaded
    pub fn unloaded() -> Self {
        Self::default()
    }

    /// Context from optional halves
    pub fn from_parts(
        vectorizer: Option<Arc<dyn Vectorizer>>,
        classifier: Option<Arc<dyn Classifier>>,
    ) -> Self {
        Self {
            vectorizer,
            classifier,
        }
    }

    /// Load both artifacts, failing if either cannot be read or is inconsistent
    pub fn load(paths: &ModelPaths) -> Result<Self> {
        info!("Loading vectorizer from: {}", paths.vectorizer_path.display());
        let vectorizer = TfidfVectorizer::from_file(&paths.vectorizer_path)?;

        info!("Loading classifier from: {}", paths.classifier_path.display());
        let classifier = LogisticRegression::from_file(&paths.classifier_path)?;

        if vectorizer.num_features() != classifier.num_features() {
            return Err(Error::artifact(format!(
                "vectorizer produces {} features but classifier expects {}",
                vectorizer.num_features(),
                classifier.num_features()
            )));
        }

        info!(
            features = vectorizer.num_features(),
            "Model and vectorizer loaded successfully"
        );
        Ok(Self::new(Arc::new(vectorizer), Arc::new(classifier)))
    }

    /// Load both artifacts, or return an unloaded context and log why
    pub fn load_or_unloaded(paths: &ModelPaths) -> Self {
        match Self::load(paths) {
            Ok(context) => context,
            Err(e) => {
                error!("Error loading model: {}", e);
                Self::unloaded()
            }
        }
    }

    /// Both vectorizer and classifier are present
    pub fn is_loaded(&self) -> bool {
        self.vectorizer.is_some() && self.classifier.is_some()
    }

    /// `"loaded"` or `"not loaded"`, as reported by the health check
    pub fn status(&self) -> &'static str {
        if self.is_loaded() {
            "loaded"
        } else {
            "not loaded"
        }
    }

    pub fn vectorizer(&self) -> Option<&Arc<dyn Vectorizer>> {
        self.vectorizer.as_ref()
    }

    pub fn classifier(&self) -> Option<&Arc<dyn Classifier>> {
        self.classifier.as_ref()
    }
}

impl std::fmt::Debug for ModelContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelContext")
            .field("vectorizer", &self.vectorizer.as_ref().map(|v| v.name()))
            .field("classifier", &self.classifier.as_ref().map(|c| c.name()))
            .finish()
    }
}
