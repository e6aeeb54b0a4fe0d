//! Assessment history handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Assessment;
use crate::{AppResult, AppState};

/// History responses are capped; the dashboard pages beyond this.
const DEFAULT_HISTORY_LIMIT: i64 = 200;

#[derive(Debug, Deserialize, Default)]
pub struct HistoryFilter {
    pub mine_name: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted_count: u64,
}

/// Newest-first assessment log, optionally scoped to one mine
pub async fn history(
    State(state): State<AppState>,
    Query(filter): Query<HistoryFilter>,
) -> AppResult<Json<Vec<Assessment>>> {
    let limit = filter
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, DEFAULT_HISTORY_LIMIT);

    let assessments = Assessment::history(&state.pool, filter.mine_name.as_deref(), limit).await?;
    Ok(Json(assessments))
}

/// Bulk delete, optionally scoped to one mine
pub async fn clear(
    State(state): State<AppState>,
    Query(filter): Query<HistoryFilter>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted_count = Assessment::clear(&state.pool, filter.mine_name.as_deref()).await?;
    Ok(Json(DeleteResponse { deleted_count }))
}

/// Delete a single assessment by id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted_count = Assessment::delete_by_id(&state.pool, id).await?;
    Ok(Json(DeleteResponse { deleted_count }))
}
