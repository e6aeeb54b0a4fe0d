//! Stored sensor ingest model
//!
//! Raw payloads pushed by field gateways, stamped on receipt. Distinct from
//! the synthetic live readings, which are never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredSensorReading {
    pub id: Uuid,
    pub payload: serde_json::Value,
    pub received_at: DateTime<Utc>,
}

impl StoredSensorReading {
    pub async fn insert(pool: &PgPool, payload: serde_json::Value) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, StoredSensorReading>(
            r#"
            INSERT INTO sensor_readings (payload, received_at)
            VALUES ($1, NOW())
            RETURNING *
            "#,
        )
        .bind(payload)
        .fetch_one(pool)
        .await
    }
}
