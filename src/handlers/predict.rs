//! Prediction handler
//!
//! Runs the assessment pipeline. The response is computed fully before the
//! audit record is written; the write runs off the request path so a slow or
//! failed insert never delays or invalidates the verdict. Write failures are
//! reported through tracing (at-most-once write semantics).

use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::ValidationError;
use crate::logic::pipeline;
use crate::logic::risk::RiskAssessment;
use crate::models::Assessment;
use crate::{AppError, AppResult, AppState};

pub async fn predict(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<RiskAssessment>> {
    let raw = body
        .as_object()
        .ok_or(AppError::from(ValidationError::NotAnObject))?;

    let assessment = pipeline::assess(state.model.classifier.as_ref(), raw)?;

    // Verdict is final; persist the merged audit record in the background.
    let record = serde_json::Value::Object(pipeline::persisted_record(raw, &assessment));
    let mine_name = raw
        .get("mine_name")
        .and_then(|v| v.as_str())
        .map(String::from);
    let pool = state.pool.clone();
    let stored = assessment.clone();

    tokio::spawn(async move {
        if let Err(e) = Assessment::insert(&pool, mine_name.as_deref(), &stored, record).await {
            tracing::error!("Failed to persist assessment: {}", e);
        }
    });

    Ok(Json(assessment))
}
