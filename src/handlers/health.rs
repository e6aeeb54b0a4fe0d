//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppResult, AppState};

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
}

pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

#[derive(Serialize)]
pub struct DbHealthResponse {
    status: &'static str,
    database: &'static str,
}

/// Connectivity probe against the database
pub async fn db(State(state): State<AppState>) -> AppResult<Json<DbHealthResponse>> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;

    Ok(Json(DbHealthResponse {
        status: "healthy",
        database: "connected",
    }))
}
