//! Risk verdict types and scoring

pub mod scorer;
pub mod types;

pub use types::{ProbabilityDistribution, RiskAssessment, RiskLevel, RiskVerdict};
