//! Assessment Pipeline
//!
//! Validate the raw reading, classify, score, stamp. The returned
//! [`RiskAssessment`] is complete before anything is persisted; the handler
//! forwards the merged audit record to storage off the request path.

use serde_json::{Map, Value};

use crate::error::{AppError, ValidationError};
use crate::logic::features::FeatureVector;
use crate::logic::model::{Classifier, ClassifierError};
use crate::logic::risk::scorer;
use crate::logic::risk::types::RiskAssessment;

#[derive(Debug, thiserror::Error)]
pub enum AssessError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

impl From<AssessError> for AppError {
    fn from(err: AssessError) -> Self {
        match err {
            AssessError::Validation(e) => e.into(),
            AssessError::Classifier(e) => e.into(),
        }
    }
}

/// Run one assessment over a raw feature map.
///
/// Validation happens before the classifier is invoked: a partial vector is
/// never forwarded to the model. Classifier failures abort with no default
/// verdict.
pub fn assess(
    classifier: &dyn Classifier,
    raw: &Map<String, Value>,
) -> Result<RiskAssessment, AssessError> {
    let features = FeatureVector::try_from_map(raw)?;
    let distribution = classifier.classify(&features.to_array())?;
    let verdict = scorer::score(&distribution);

    Ok(RiskAssessment::new(verdict, distribution))
}

/// Audit record for persistence: union of the raw input fields and the
/// computed assessment fields. Computed fields win on key collision.
pub fn persisted_record(raw: &Map<String, Value>, assessment: &RiskAssessment) -> Map<String, Value> {
    let mut record = raw.clone();

    record.insert("risk_level".to_string(), Value::from(assessment.risk_level.as_str()));
    record.insert("risk_score".to_string(), Value::from(assessment.risk_score));
    record.insert("alert".to_string(), Value::from(assessment.alert));
    record.insert(
        "probabilities".to_string(),
        serde_json::to_value(assessment.probabilities).unwrap_or(Value::Null),
    );
    record.insert("confidence".to_string(), Value::from(assessment.confidence));
    record.insert(
        "timestamp".to_string(),
        Value::from(assessment.timestamp.to_rfc3339()),
    );

    record
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;
    use crate::logic::features::FEATURE_COUNT;
    use crate::logic::risk::types::{ProbabilityDistribution, RiskLevel, ALERT_HIGH};

    /// Fixed-output classifier that counts invocations.
    struct StubClassifier {
        distribution: ProbabilityDistribution,
        calls: AtomicUsize,
    }

    impl StubClassifier {
        fn returning(low: f64, medium: f64, high: f64) -> Self {
            Self {
                distribution: ProbabilityDistribution::new(low, medium, high).unwrap(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Classifier for StubClassifier {
        fn classify(
            &self,
            _features: &[f64; FEATURE_COUNT],
        ) -> Result<ProbabilityDistribution, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.distribution)
        }
    }

    fn raw_reading() -> Map<String, Value> {
        json!({
            "slope_angle_deg": 70,
            "rainfall_mm_24h": 180,
            "rock_strength_mpa": 30,
            "seismic_events_24h": 40,
            "soil_moisture_pct": 90,
            "crack_width_mm": 150,
            "mine_depth_m": 700,
            "past_incidents": 15,
            "blasting_activity": 1,
            "mine_name": "jharia-east"
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let classifier = StubClassifier::returning(0.05, 0.15, 0.80);
        let assessment = assess(&classifier, &raw_reading()).unwrap();

        assert_eq!(assessment.risk_score, 87);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.alert, ALERT_HIGH);
        assert_eq!(assessment.confidence, 80);
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_input_never_reaches_classifier() {
        let classifier = StubClassifier::returning(1.0, 0.0, 0.0);

        let mut raw = raw_reading();
        raw.remove("seismic_events_24h");

        let err = assess(&classifier, &raw).unwrap_err();
        assert!(matches!(
            err,
            AssessError::Validation(ValidationError::MissingField("seismic_events_24h"))
        ));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_classifier_failure_aborts_with_no_default() {
        struct FailingClassifier;
        impl Classifier for FailingClassifier {
            fn classify(
                &self,
                _features: &[f64; FEATURE_COUNT],
            ) -> Result<ProbabilityDistribution, ClassifierError> {
                Err(ClassifierError::Inference("model unavailable".to_string()))
            }
        }

        let err = assess(&FailingClassifier, &raw_reading()).unwrap_err();
        assert!(matches!(err, AssessError::Classifier(_)));
    }

    #[test]
    fn test_persisted_record_merges_input_and_verdict() {
        let classifier = StubClassifier::returning(0.05, 0.15, 0.80);
        let raw = raw_reading();
        let assessment = assess(&classifier, &raw).unwrap();

        let record = persisted_record(&raw, &assessment);

        // Input fields survive for the audit trail
        assert_eq!(record["mine_name"], json!("jharia-east"));
        assert_eq!(record["slope_angle_deg"], json!(70));

        // Computed fields are present
        assert_eq!(record["risk_level"], json!("High"));
        assert_eq!(record["risk_score"], json!(87));
        assert_eq!(record["confidence"], json!(80));
        assert_eq!(record["probabilities"]["High"], json!(0.80));
    }

    #[test]
    fn test_computed_fields_win_on_collision() {
        let classifier = StubClassifier::returning(0.05, 0.15, 0.80);
        let mut raw = raw_reading();
        raw.insert("risk_score".to_string(), json!(1));
        raw.insert("alert".to_string(), json!("spoofed"));

        let assessment = assess(&classifier, &raw).unwrap();
        let record = persisted_record(&raw, &assessment);

        assert_eq!(record["risk_score"], json!(87));
        assert_eq!(record["alert"], json!(ALERT_HIGH));
    }
}
