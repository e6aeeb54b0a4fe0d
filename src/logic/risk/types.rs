//! Risk Types
//!
//! Data structures for the risk verdict; no scoring logic here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Alert text per level (fixed contract with the dashboard)
pub const ALERT_HIGH: &str = "⚠ High Risk! Immediate inspection required!";
pub const ALERT_MEDIUM: &str = "⚠ Caution advised";
pub const ALERT_LOW: &str = "✔ Safe conditions";

/// Rockfall risk classes the model was trained on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Class order of the trained label encoder (lexicographic). Argmax ties are
/// broken by scanning in this order, first maximum wins.
pub const ENCODER_CLASS_ORDER: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Low, RiskLevel::Medium];

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Parse a model artifact class label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(RiskLevel::Low),
            "Medium" => Some(RiskLevel::Medium),
            "High" => Some(RiskLevel::High),
            _ => None,
        }
    }

    /// Operator-facing alert message for this level.
    pub fn alert(&self) -> &'static str {
        match self {
            RiskLevel::High => ALERT_HIGH,
            RiskLevel::Medium => ALERT_MEDIUM,
            RiskLevel::Low => ALERT_LOW,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PROBABILITY DISTRIBUTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DistributionError {
    #[error("probability for {level} out of range: {value}")]
    OutOfRange { level: RiskLevel, value: f64 },

    #[error("probabilities sum to {0}, expected 1")]
    BadSum(f64),
}

/// Class probabilities produced by one classification call.
///
/// Validated at construction (each value finite and in [0,1], total within
/// tolerance of 1) and never mutated afterward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityDistribution {
    #[serde(rename = "Low")]
    low: f64,
    #[serde(rename = "Medium")]
    medium: f64,
    #[serde(rename = "High")]
    high: f64,
}

/// Floating tolerance on the probability sum
const SUM_TOLERANCE: f64 = 1e-6;

impl ProbabilityDistribution {
    pub fn new(low: f64, medium: f64, high: f64) -> Result<Self, DistributionError> {
        for (level, value) in [
            (RiskLevel::Low, low),
            (RiskLevel::Medium, medium),
            (RiskLevel::High, high),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DistributionError::OutOfRange { level, value });
            }
        }

        let sum = low + medium + high;
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(DistributionError::BadSum(sum));
        }

        Ok(Self { low, medium, high })
    }

    pub fn get(&self, level: RiskLevel) -> f64 {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }

    /// Predicted class: maximum probability, ties broken by
    /// [`ENCODER_CLASS_ORDER`] (first encountered wins).
    pub fn argmax(&self) -> RiskLevel {
        let mut best = ENCODER_CLASS_ORDER[0];
        let mut best_p = self.get(best);

        for level in &ENCODER_CLASS_ORDER[1..] {
            let p = self.get(*level);
            if p > best_p {
                best = *level;
                best_p = p;
            }
        }

        best
    }

    pub fn max_probability(&self) -> f64 {
        self.get(self.argmax())
    }
}

// ============================================================================
// VERDICT & ASSESSMENT RECORD
// ============================================================================

/// Deterministic output of the risk scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskVerdict {
    pub risk_level: RiskLevel,
    pub risk_score: i32,
    pub alert: &'static str,
    pub confidence: i32,
}

/// Immutable result of one assessment request.
///
/// Built once per request, handed to persistence, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub risk_score: i32,
    pub alert: &'static str,
    pub probabilities: ProbabilityDistribution,
    pub confidence: i32,
    pub timestamp: DateTime<Utc>,
}

impl RiskAssessment {
    pub fn new(verdict: RiskVerdict, probabilities: ProbabilityDistribution) -> Self {
        Self {
            risk_level: verdict.risk_level,
            risk_score: verdict.risk_score,
            alert: verdict.alert,
            probabilities,
            confidence: verdict.confidence,
            timestamp: Utc::now(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
