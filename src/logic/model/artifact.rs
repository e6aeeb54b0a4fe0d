//! Model artifact format
//!
//! The offline trainer exports the fitted model as JSON: encoder class order,
//! per-feature standardization parameters, one weight row plus intercept per
//! class, and training provenance. Everything is validated up front so a
//! stale or hand-edited artifact fails at startup instead of at inference
//! time.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::features::{FEATURE_COUNT, FEATURE_FIELDS};
use crate::logic::risk::types::RiskLevel;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

// ============================================================================
// ARTIFACT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub model_type: String,
    /// Held-out accuracy reported by the trainer
    pub accuracy: f64,
    pub trained_at: Option<DateTime<Utc>>,
}

/// Exported fitted model, as written by the offline trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Class labels in encoder order
    pub classes: Vec<String>,
    /// Feature names in training order
    pub feature_names: Vec<String>,
    /// Standardization mean per feature
    pub feature_means: Vec<f64>,
    /// Standardization scale per feature
    pub feature_stds: Vec<f64>,
    /// One weight row per class, `classes.len() x feature_names.len()`
    pub weights: Vec<Vec<f64>>,
    /// One intercept per class
    pub intercepts: Vec<f64>,
    pub metadata: ArtifactMetadata,
}

impl ModelArtifact {
    pub fn from_file(path: &Path) -> Result<Self, ModelLoadError> {
        let raw = std::fs::read(path)?;
        Self::from_slice(&raw)
    }

    pub fn from_slice(raw: &[u8]) -> Result<Self, ModelLoadError> {
        let artifact: Self = serde_json::from_slice(raw)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Structural validation: known classes, the exact trained feature
    /// layout, matching dimensions, finite parameters, positive scales.
    pub fn validate(&self) -> Result<(), ModelLoadError> {
        let mut seen = HashSet::new();
        for class in &self.classes {
            let level = RiskLevel::from_label(class)
                .ok_or_else(|| ModelLoadError::Invalid(format!("unknown class `{}`", class)))?;
            if !seen.insert(level) {
                return Err(ModelLoadError::Invalid(format!("duplicate class `{}`", class)));
            }
        }
        if seen.len() != 3 {
            return Err(ModelLoadError::Invalid(format!(
                "expected 3 classes, found {}",
                self.classes.len()
            )));
        }

        if self.feature_names != FEATURE_FIELDS {
            return Err(ModelLoadError::Invalid(
                "feature layout does not match the trained field order".to_string(),
            ));
        }

        if self.feature_means.len() != FEATURE_COUNT || self.feature_stds.len() != FEATURE_COUNT {
            return Err(ModelLoadError::Invalid(
                "standardization parameters must cover every feature".to_string(),
            ));
        }
        for std in &self.feature_stds {
            if !std.is_finite() || *std <= 0.0 {
                return Err(ModelLoadError::Invalid(format!(
                    "feature scale must be positive and finite, got {}",
                    std
                )));
            }
        }
        if self.feature_means.iter().any(|m| !m.is_finite()) {
            return Err(ModelLoadError::Invalid("non-finite feature mean".to_string()));
        }

        if self.weights.len() != self.classes.len() || self.intercepts.len() != self.classes.len() {
            return Err(ModelLoadError::Invalid(
                "weights and intercepts must have one row per class".to_string(),
            ));
        }
        for row in &self.weights {
            if row.len() != FEATURE_COUNT {
                return Err(ModelLoadError::Invalid(
                    "weight row length does not match feature count".to_string(),
                ));
            }
            if row.iter().any(|w| !w.is_finite()) {
                return Err(ModelLoadError::Invalid("non-finite weight".to_string()));
            }
        }
        if self.intercepts.iter().any(|b| !b.is_finite()) {
            return Err(ModelLoadError::Invalid("non-finite intercept".to_string()));
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_artifact() -> ModelArtifact {
        ModelArtifact {
            classes: vec!["High".to_string(), "Low".to_string(), "Medium".to_string()],
            feature_names: FEATURE_FIELDS.iter().map(|f| f.to_string()).collect(),
            feature_means: vec![0.0; FEATURE_COUNT],
            feature_stds: vec![1.0; FEATURE_COUNT],
            weights: vec![vec![0.0; FEATURE_COUNT]; 3],
            intercepts: vec![0.0; 3],
            metadata: ArtifactMetadata {
                model_type: "linear_softmax".to_string(),
                accuracy: 0.95,
                trained_at: None,
            },
        }
    }

    #[test]
    fn test_minimal_artifact_validates() {
        assert!(minimal_artifact().validate().is_ok());
    }

    #[test]
    fn test_unknown_class_rejected() {
        let mut artifact = minimal_artifact();
        artifact.classes[0] = "Critical".to_string();
        assert!(matches!(artifact.validate(), Err(ModelLoadError::Invalid(_))));
    }

    #[test]
    fn test_duplicate_class_rejected() {
        let mut artifact = minimal_artifact();
        artifact.classes[0] = "Low".to_string();
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn test_wrong_feature_order_rejected() {
        let mut artifact = minimal_artifact();
        artifact.feature_names.swap(7, 8);
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn test_zero_scale_rejected() {
        let mut artifact = minimal_artifact();
        artifact.feature_stds[3] = 0.0;
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn test_ragged_weights_rejected() {
        let mut artifact = minimal_artifact();
        artifact.weights[1].pop();
        assert!(artifact.validate().is_err());
    }

    #[test]
    fn test_shipped_default_artifact_parses() {
        let raw = include_bytes!("../../../model/risk_model.json");
        let artifact = ModelArtifact::from_slice(raw).unwrap();
        assert_eq!(artifact.classes.len(), 3);
    }
}
