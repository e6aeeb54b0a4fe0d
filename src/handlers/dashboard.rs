//! Dashboard handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::models::{Assessment, Worker};
use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub safety_score: i64,
    pub assessments_total: i64,
    pub high_risk_total: i64,
    pub active_workers: i64,
    /// Held-out accuracy of the loaded model artifact
    pub model_accuracy: f64,
}

/// Aggregate site stats for the overview page
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let (assessments_total, high_risk_total) = Assessment::counts(&state.pool).await?;
    let active_workers = Worker::count(&state.pool).await?;

    Ok(Json(DashboardStats {
        safety_score: (100 - high_risk_total).max(0),
        assessments_total,
        high_risk_total,
        active_workers,
        model_accuracy: state.model.metadata.accuracy,
    }))
}
