//! Risk Scorer
//!
//! Pure mapping from a validated class-probability distribution to a bounded
//! risk score, predicted level, alert message and confidence. No I/O, no
//! hidden state; identical input always yields identical output.

use super::types::{ProbabilityDistribution, RiskLevel, RiskVerdict};

/// Score a probability distribution.
///
/// `risk_score = floor(P(Medium) * 50 + P(High) * 100)`, which lands in
/// [0, 100] for any valid distribution. Confidence is the truncated percentage
/// of the maximum class probability. Both use truncation, not rounding,
/// matching the trained system's integer casts.
pub fn score(distribution: &ProbabilityDistribution) -> RiskVerdict {
    let risk_score = (distribution.get(RiskLevel::Medium) * 50.0
        + distribution.get(RiskLevel::High) * 100.0)
        .floor() as i32;

    let risk_level = distribution.argmax();
    let confidence = (distribution.max_probability() * 100.0).floor() as i32;

    RiskVerdict {
        risk_level,
        risk_score,
        alert: risk_level.alert(),
        confidence,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::risk::types::{ALERT_HIGH, ALERT_LOW, ALERT_MEDIUM};

    fn dist(low: f64, medium: f64, high: f64) -> ProbabilityDistribution {
        ProbabilityDistribution::new(low, medium, high).unwrap()
    }

    #[test]
    fn test_score_is_zero_when_all_mass_on_low() {
        let verdict = score(&dist(1.0, 0.0, 0.0));
        assert_eq!(verdict.risk_score, 0);
        assert_eq!(verdict.risk_level, RiskLevel::Low);
        assert_eq!(verdict.alert, ALERT_LOW);
        assert_eq!(verdict.confidence, 100);
    }

    #[test]
    fn test_score_is_hundred_when_all_mass_on_high() {
        let verdict = score(&dist(0.0, 0.0, 1.0));
        assert_eq!(verdict.risk_score, 100);
        assert_eq!(verdict.risk_level, RiskLevel::High);
        assert_eq!(verdict.alert, ALERT_HIGH);
    }

    #[test]
    fn test_score_truncates_not_rounds() {
        // 0.15 * 50 + 0.80 * 100 = 87.5 -> 87
        let verdict = score(&dist(0.05, 0.15, 0.80));
        assert_eq!(verdict.risk_score, 87);
        assert_eq!(verdict.risk_level, RiskLevel::High);
        assert_eq!(verdict.confidence, 80);
    }

    #[test]
    fn test_worked_example() {
        // {Low: 0.1, Medium: 0.2, High: 0.7} -> score 80, confidence 70
        let verdict = score(&dist(0.1, 0.2, 0.7));
        assert_eq!(verdict.risk_score, 80);
        assert_eq!(verdict.confidence, 70);
        assert_eq!(verdict.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_medium_majority_gets_caution_alert() {
        let verdict = score(&dist(0.2, 0.6, 0.2));
        assert_eq!(verdict.risk_level, RiskLevel::Medium);
        assert_eq!(verdict.alert, ALERT_MEDIUM);
        assert_eq!(verdict.risk_score, 50);
        assert_eq!(verdict.confidence, 60);
    }

    #[test]
    fn test_score_stays_in_bounds() {
        let cases = [
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
            (0.33, 0.33, 0.34),
            (0.25, 0.5, 0.25),
            (0.05, 0.15, 0.80),
        ];
        for (low, medium, high) in cases {
            let verdict = score(&dist(low, medium, high));
            assert!((0..=100).contains(&verdict.risk_score));
            assert!((0..=100).contains(&verdict.confidence));
        }
    }

    #[test]
    fn test_scorer_is_idempotent() {
        let d = dist(0.3, 0.4, 0.3);
        assert_eq!(score(&d), score(&d));
    }
}
