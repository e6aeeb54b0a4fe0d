//! Feature Vector - fixed geological input to classification
//!
//! The classifier is position-sensitive, not name-sensitive: the order of
//! `FEATURE_FIELDS` is part of the trained artifact's contract and must never
//! change without retraining.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Number of input features the model was trained on
pub const FEATURE_COUNT: usize = 9;

/// Feature names in training order
pub const FEATURE_FIELDS: [&str; FEATURE_COUNT] = [
    "slope_angle_deg",
    "rainfall_mm_24h",
    "rock_strength_mpa",
    "seismic_events_24h",
    "soil_moisture_pct",
    "crack_width_mm",
    "mine_depth_m",
    "past_incidents",
    "blasting_activity",
];

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Validated geological reading, ready for classification.
///
/// Construction goes through [`FeatureVector::try_from_map`], which is the
/// single place raw request input is checked. A constructed vector is always
/// complete and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub slope_angle_deg: f64,
    pub rainfall_mm_24h: f64,
    pub rock_strength_mpa: f64,
    pub seismic_events_24h: f64,
    pub soil_moisture_pct: f64,
    pub crack_width_mm: f64,
    pub mine_depth_m: f64,
    pub past_incidents: f64,
    pub blasting_activity: f64,
}

impl FeatureVector {
    /// Strict boundary validation: every field in [`FEATURE_FIELDS`] must be
    /// present and numeric. Fails on the first offending field in training
    /// order. Extra keys in the map are ignored here (the pipeline keeps them
    /// for the audit record); they never reach the model.
    pub fn try_from_map(raw: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut values = [0.0f64; FEATURE_COUNT];

        for (i, field) in FEATURE_FIELDS.iter().copied().enumerate() {
            let value = match raw.get(field) {
                None | Some(Value::Null) => {
                    return Err(ValidationError::MissingField(field));
                }
                Some(v) => v,
            };

            let number = value
                .as_f64()
                .ok_or(ValidationError::NotNumeric(field))?;

            if !number.is_finite() {
                return Err(ValidationError::NotFinite(field));
            }

            values[i] = number;
        }

        Ok(Self::from_values(values))
    }

    /// Build from values already in training order.
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            slope_angle_deg: values[0],
            rainfall_mm_24h: values[1],
            rock_strength_mpa: values[2],
            seismic_events_24h: values[3],
            soil_moisture_pct: values[4],
            crack_width_mm: values[5],
            mine_depth_m: values[6],
            past_incidents: values[7],
            blasting_activity: values[8],
        }
    }

    /// Values in training order, as consumed by the classifier.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.slope_angle_deg,
            self.rainfall_mm_24h,
            self.rock_strength_mpa,
            self.seismic_events_24h,
            self.soil_moisture_pct,
            self.crack_width_mm,
            self.mine_depth_m,
            self.past_incidents,
            self.blasting_activity,
        ]
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_input() -> Map<String, Value> {
        json!({
            "slope_angle_deg": 70,
            "rainfall_mm_24h": 180,
            "rock_strength_mpa": 30,
            "seismic_events_24h": 40,
            "soil_moisture_pct": 90,
            "crack_width_mm": 150,
            "mine_depth_m": 700,
            "past_incidents": 15,
            "blasting_activity": 1
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn test_valid_input_builds_ordered_vector() {
        let vector = FeatureVector::try_from_map(&full_input()).unwrap();
        assert_eq!(
            vector.to_array(),
            [70.0, 180.0, 30.0, 40.0, 90.0, 150.0, 700.0, 15.0, 1.0]
        );
    }

    #[test]
    fn test_missing_field_is_named() {
        let mut raw = full_input();
        raw.remove("crack_width_mm");

        let err = FeatureVector::try_from_map(&raw).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField("crack_width_mm")));
    }

    #[test]
    fn test_null_counts_as_missing() {
        let mut raw = full_input();
        raw.insert("soil_moisture_pct".to_string(), Value::Null);

        let err = FeatureVector::try_from_map(&raw).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField("soil_moisture_pct")));
    }

    #[test]
    fn test_first_missing_field_wins_in_training_order() {
        let mut raw = full_input();
        raw.remove("rainfall_mm_24h");
        raw.remove("mine_depth_m");

        let err = FeatureVector::try_from_map(&raw).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField("rainfall_mm_24h")));
    }

    #[test]
    fn test_non_numeric_field_rejected() {
        let mut raw = full_input();
        raw.insert("mine_depth_m".to_string(), json!("deep"));

        let err = FeatureVector::try_from_map(&raw).unwrap_err();
        assert!(matches!(err, ValidationError::NotNumeric("mine_depth_m")));
    }

    #[test]
    fn test_extra_fields_are_tolerated() {
        let mut raw = full_input();
        raw.insert("mine_name".to_string(), json!("jharia-east"));

        assert!(FeatureVector::try_from_map(&raw).is_ok());
    }
}
