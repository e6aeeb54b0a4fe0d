//! Decision logic: feature validation, classification, scoring, telemetry.
//!
//! Everything in here is deterministic given its inputs (telemetry excepted,
//! which is deliberately random) and free of I/O; persistence and transport
//! live in `models` and `handlers`.

pub mod features;
pub mod model;
pub mod pipeline;
pub mod risk;
pub mod telemetry;
