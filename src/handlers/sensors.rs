//! Sensor handlers

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::logic::telemetry::{self, SensorReading};
use crate::models::StoredSensorReading;
use crate::{AppResult, AppState};

/// Synthetic live reading for the dashboard. Ephemeral, never stored.
pub async fn live() -> Json<SensorReading> {
    Json(telemetry::generate())
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub integration_active: bool,
}

/// Store a raw gateway payload, stamped on receipt.
pub async fn ingest(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<Json<IngestResponse>> {
    StoredSensorReading::insert(&state.pool, payload).await?;

    Ok(Json(IngestResponse {
        status: "success",
        message: "Sensor data stored",
        integration_active: true,
    }))
}
