//! Worker handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::{CreateWorker, Worker};
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted_count: u64,
}

/// List workers of one mine
pub async fn list(
    State(state): State<AppState>,
    Path(mine_name): Path<String>,
) -> AppResult<Json<Vec<Worker>>> {
    let workers = Worker::list_by_mine(&state.pool, &mine_name).await?;
    Ok(Json(workers))
}

/// Create a worker record
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateWorker>,
) -> AppResult<Json<Worker>> {
    req.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let worker = Worker::create(&state.pool, req).await?;
    Ok(Json(worker))
}

/// Delete by id; responds with the removed count (0 when absent)
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted_count = Worker::delete(&state.pool, id).await?;
    Ok(Json(DeleteResponse { deleted_count }))
}
