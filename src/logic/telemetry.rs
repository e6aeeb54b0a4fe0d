//! Telemetry Synthesizer
//!
//! Synthetic live sensor readings for the dashboard: mostly normal values,
//! sometimes warning-band, rarely danger-band. Each sensor draws
//! independently — pick a tier by weighted sampling, then draw uniformly
//! within that tier's bounds. Stateless and intentionally unseeded.

use rand::Rng;
use serde::Serialize;

// ============================================================================
// TIER TABLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    /// Uniform draw rounded to `decimals`
    Continuous { decimals: i32 },
    /// Uniform draw over the inclusive integer range
    Integer,
}

/// Per-sensor sampling contract: tier weights and inclusive value bounds for
/// normal / warning / danger.
#[derive(Debug, Clone, Copy)]
pub struct SensorSpec {
    pub name: &'static str,
    pub kind: SensorKind,
    pub weights: [f64; 3],
    pub bounds: [(f64, f64); 3],
}

pub const METHANE: SensorSpec = SensorSpec {
    name: "methane",
    kind: SensorKind::Continuous { decimals: 2 },
    weights: [0.85, 0.10, 0.05],
    bounds: [(0.0, 1.0), (1.0, 1.5), (1.5, 2.0)],
};

pub const CARBON_MONOXIDE: SensorSpec = SensorSpec {
    name: "carbon_monoxide",
    kind: SensorKind::Integer,
    weights: [0.85, 0.10, 0.05],
    bounds: [(0.0, 9.0), (10.0, 25.0), (26.0, 40.0)],
};

pub const OXYGEN: SensorSpec = SensorSpec {
    name: "oxygen",
    kind: SensorKind::Continuous { decimals: 1 },
    weights: [0.90, 0.08, 0.02],
    bounds: [(20.9, 21.5), (19.0, 20.8), (18.0, 18.9)],
};

pub const PM2_5: SensorSpec = SensorSpec {
    name: "pm2_5",
    kind: SensorKind::Integer,
    weights: [0.80, 0.15, 0.05],
    bounds: [(0.0, 35.0), (36.0, 75.0), (76.0, 100.0)],
};

pub const PM10: SensorSpec = SensorSpec {
    name: "pm10",
    kind: SensorKind::Integer,
    weights: [0.80, 0.15, 0.05],
    bounds: [(0.0, 50.0), (51.0, 100.0), (101.0, 150.0)],
};

pub const TEMPERATURE: SensorSpec = SensorSpec {
    name: "temperature",
    kind: SensorKind::Integer,
    weights: [0.85, 0.10, 0.05],
    bounds: [(25.0, 40.0), (41.0, 55.0), (56.0, 65.0)],
};

pub const VIBRATION: SensorSpec = SensorSpec {
    name: "vibration",
    kind: SensorKind::Continuous { decimals: 1 },
    weights: [0.90, 0.08, 0.02],
    bounds: [(0.0, 2.0), (2.1, 4.0), (4.1, 6.0)],
};

pub const ALL_SENSORS: [&SensorSpec; 7] = [
    &METHANE,
    &CARBON_MONOXIDE,
    &OXYGEN,
    &PM2_5,
    &PM10,
    &TEMPERATURE,
    &VIBRATION,
];

// ============================================================================
// READING
// ============================================================================

/// One synthetic reading across all mine sensors. Ephemeral: generated per
/// request, not persisted.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SensorReading {
    pub methane: f64,
    pub carbon_monoxide: i64,
    pub oxygen: f64,
    pub pm2_5: i64,
    pub pm10: i64,
    pub temperature: i64,
    pub vibration: f64,
}

// ============================================================================
// SAMPLING
// ============================================================================

/// Weighted discrete tier pick. Weights sum to 1 by construction of the
/// tables above, so the fallthrough only covers accumulated rounding.
pub fn pick_tier<R: Rng + ?Sized>(rng: &mut R, weights: &[f64; 3]) -> usize {
    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (tier, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if roll < cumulative {
            return tier;
        }
    }
    weights.len() - 1
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Draw one value for a sensor: weighted tier, then uniform within bounds.
pub fn sample<R: Rng + ?Sized>(rng: &mut R, spec: &SensorSpec) -> f64 {
    let (lo, hi) = spec.bounds[pick_tier(rng, &spec.weights)];
    match spec.kind {
        SensorKind::Continuous { decimals } => round_to(rng.gen_range(lo..=hi), decimals),
        SensorKind::Integer => rng.gen_range(lo as i64..=hi as i64) as f64,
    }
}

/// Generate a full reading from the process RNG.
pub fn generate() -> SensorReading {
    generate_with(&mut rand::thread_rng())
}

pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> SensorReading {
    SensorReading {
        methane: sample(rng, &METHANE),
        carbon_monoxide: sample(rng, &CARBON_MONOXIDE) as i64,
        oxygen: sample(rng, &OXYGEN),
        pm2_5: sample(rng, &PM2_5) as i64,
        pm10: sample(rng, &PM10) as i64,
        temperature: sample(rng, &TEMPERATURE) as i64,
        vibration: sample(rng, &VIBRATION),
    }
}

// ============================================================================
// TESTS
// ============================================================================
