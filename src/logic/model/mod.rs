//! Classifier Capability
//!
//! The trained rockfall model behind a narrow trait: ordered feature values
//! in, validated class-probability distribution out. The model artifact is
//! loaded exactly once at process start into a [`ModelContext`] that is
//! injected into request handling and treated as immutable for the process
//! lifetime.

pub mod artifact;
pub mod softmax;

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::logic::features::FEATURE_COUNT;
use crate::logic::risk::types::{DistributionError, ProbabilityDistribution};

pub use artifact::{ModelArtifact, ModelLoadError};
pub use softmax::SoftmaxClassifier;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("inference failed: {0}")]
    Inference(String),

    #[error("classifier produced a malformed distribution: {0}")]
    MalformedDistribution(#[from] DistributionError),
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// A trained multi-class probabilistic classifier.
///
/// Implementations must be safe for concurrent read-only inference; the
/// pipeline shares one instance across all requests.
pub trait Classifier: Send + Sync {
    fn classify(&self, features: &[f64; FEATURE_COUNT])
        -> Result<ProbabilityDistribution, ClassifierError>;
}

// ============================================================================
// MODEL CONTEXT
// ============================================================================

/// Training provenance of the loaded artifact, surfaced on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub model_type: String,
    pub accuracy: f64,
    pub trained_at: Option<DateTime<Utc>>,
    pub loaded_at: DateTime<Utc>,
}

/// Load-once handle to the classifier and its provenance.
#[derive(Clone)]
pub struct ModelContext {
    pub classifier: Arc<dyn Classifier>,
    pub metadata: ModelMetadata,
}

impl ModelContext {
    pub fn new(classifier: Arc<dyn Classifier>, metadata: ModelMetadata) -> Self {
        Self { classifier, metadata }
    }

    /// Read and validate the model artifact, then build the runtime
    /// classifier. Called once from `main`; a bad artifact fails startup.
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let artifact = ModelArtifact::from_file(path)?;
        let classifier = SoftmaxClassifier::from_artifact(&artifact)?;

        let metadata = ModelMetadata {
            model_path: path.display().to_string(),
            model_type: artifact.metadata.model_type.clone(),
            accuracy: artifact.metadata.accuracy,
            trained_at: artifact.metadata.trained_at,
            loaded_at: Utc::now(),
        };

        tracing::info!(
            model = %metadata.model_path,
            model_type = %metadata.model_type,
            accuracy = metadata.accuracy,
            "Risk model loaded"
        );

        Ok(Self::new(Arc::new(classifier), metadata))
    }
}
