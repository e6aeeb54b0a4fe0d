//! Linear-softmax classifier
//!
//! Runtime form of the exported artifact: standardize the feature vector,
//! apply one linear scoring row per class, softmax the logits. Stateless
//! after construction, safe for concurrent inference.

use ndarray::{Array1, Array2};

use super::artifact::{ModelArtifact, ModelLoadError};
use super::{Classifier, ClassifierError};
use crate::logic::features::FEATURE_COUNT;
use crate::logic::risk::types::{ProbabilityDistribution, RiskLevel};

pub struct SoftmaxClassifier {
    /// `classes x features`
    weights: Array2<f64>,
    intercepts: Array1<f64>,
    means: Array1<f64>,
    stds: Array1<f64>,
    /// Encoder order of the logit rows
    classes: Vec<RiskLevel>,
}

impl SoftmaxClassifier {
    pub fn from_artifact(artifact: &ModelArtifact) -> Result<Self, ModelLoadError> {
        artifact.validate()?;

        let classes: Vec<RiskLevel> = artifact
            .classes
            .iter()
            .map(|label| {
                RiskLevel::from_label(label)
                    .ok_or_else(|| ModelLoadError::Invalid(format!("unknown class `{}`", label)))
            })
            .collect::<Result<_, _>>()?;

        let flat: Vec<f64> = artifact.weights.iter().flatten().copied().collect();
        let weights = Array2::from_shape_vec((classes.len(), FEATURE_COUNT), flat)
            .map_err(|e| ModelLoadError::Invalid(format!("weight shape: {}", e)))?;

        Ok(Self {
            weights,
            intercepts: Array1::from_vec(artifact.intercepts.clone()),
            means: Array1::from_vec(artifact.feature_means.clone()),
            stds: Array1::from_vec(artifact.feature_stds.clone()),
            classes,
        })
    }
}

impl Classifier for SoftmaxClassifier {
    fn classify(
        &self,
        features: &[f64; FEATURE_COUNT],
    ) -> Result<ProbabilityDistribution, ClassifierError> {
        let x = Array1::from_iter(features.iter().copied());
        let standardized = (&x - &self.means) / &self.stds;

        let logits = self.weights.dot(&standardized) + &self.intercepts;

        // Max-shifted softmax for numeric stability
        let max_logit = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !max_logit.is_finite() {
            return Err(ClassifierError::Inference("non-finite logits".to_string()));
        }
        let exp = logits.mapv(|l| (l - max_logit).exp());
        let total: f64 = exp.sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(ClassifierError::Inference(format!(
                "degenerate softmax normalizer: {}",
                total
            )));
        }

        let mut low = 0.0;
        let mut medium = 0.0;
        let mut high = 0.0;
        for (level, p) in self.classes.iter().zip(exp.iter()) {
            match level {
                RiskLevel::Low => low = p / total,
                RiskLevel::Medium => medium = p / total,
                RiskLevel::High => high = p / total,
            }
        }

        Ok(ProbabilityDistribution::new(low, medium, high)?)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::FEATURE_FIELDS;
    use crate::logic::model::artifact::ArtifactMetadata;
    use crate::logic::risk::scorer;

    fn artifact(weights: Vec<Vec<f64>>, intercepts: Vec<f64>) -> ModelArtifact {
        ModelArtifact {
            classes: vec!["High".to_string(), "Low".to_string(), "Medium".to_string()],
            feature_names: FEATURE_FIELDS.iter().map(|f| f.to_string()).collect(),
            feature_means: vec![0.0; FEATURE_COUNT],
            feature_stds: vec![1.0; FEATURE_COUNT],
            weights,
            intercepts,
            metadata: ArtifactMetadata {
                model_type: "linear_softmax".to_string(),
                accuracy: 0.9,
                trained_at: None,
            },
        }
    }

    #[test]
    fn test_uniform_weights_give_uniform_distribution() {
        let model = SoftmaxClassifier::from_artifact(&artifact(
            vec![vec![0.0; FEATURE_COUNT]; 3],
            vec![0.0; 3],
        ))
        .unwrap();

        let dist = model.classify(&[0.0; FEATURE_COUNT]).unwrap();
        assert!((dist.get(RiskLevel::Low) - 1.0 / 3.0).abs() < 1e-12);
        assert!((dist.get(RiskLevel::Medium) - 1.0 / 3.0).abs() < 1e-12);
        assert!((dist.get(RiskLevel::High) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_intercepts_shift_the_argmax() {
        // Classes in encoder order High, Low, Medium; bias Medium strongly.
        let model = SoftmaxClassifier::from_artifact(&artifact(
            vec![vec![0.0; FEATURE_COUNT]; 3],
            vec![0.0, 0.0, 5.0],
        ))
        .unwrap();

        let dist = model.classify(&[0.0; FEATURE_COUNT]).unwrap();
        assert_eq!(dist.argmax(), RiskLevel::Medium);
        assert!(dist.get(RiskLevel::Medium) > 0.9);
    }

    #[test]
    fn test_positive_weight_raises_class_probability_with_feature() {
        // High row reacts to slope angle only.
        let mut high_row = vec![0.0; FEATURE_COUNT];
        high_row[0] = 1.0;
        let model = SoftmaxClassifier::from_artifact(&artifact(
            vec![high_row, vec![0.0; FEATURE_COUNT], vec![0.0; FEATURE_COUNT]],
            vec![0.0; 3],
        ))
        .unwrap();

        let mut steep = [0.0; FEATURE_COUNT];
        steep[0] = 4.0;
        let flat = model.classify(&[0.0; FEATURE_COUNT]).unwrap();
        let sloped = model.classify(&steep).unwrap();

        assert!(sloped.get(RiskLevel::High) > flat.get(RiskLevel::High));
        assert_eq!(sloped.argmax(), RiskLevel::High);
    }

    #[test]
    fn test_output_feeds_the_scorer() {
        let model = SoftmaxClassifier::from_artifact(&artifact(
            vec![vec![0.0; FEATURE_COUNT]; 3],
            vec![2.0, 0.0, 0.0],
        ))
        .unwrap();

        let dist = model.classify(&[0.0; FEATURE_COUNT]).unwrap();
        let verdict = scorer::score(&dist);
        assert_eq!(verdict.risk_level, RiskLevel::High);
        assert!((0..=100).contains(&verdict.risk_score));
    }
}
