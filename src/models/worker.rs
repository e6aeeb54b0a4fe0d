//! Worker model
//!
//! Worker records scoped by mine. Deletes return the removed count rather
//! than 404, matching the dashboard's contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Worker {
    pub id: Uuid,
    pub mine_name: String,
    pub name: String,
    pub role: Option<String>,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorker {
    #[validate(length(min = 1, message = "mine_name is required"))]
    pub mine_name: String,

    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    pub role: Option<String>,

    /// Free-form extra attributes (shift, contact, ...)
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl Worker {
    pub async fn create(pool: &PgPool, data: CreateWorker) -> Result<Self, sqlx::Error> {
        let details = if data.details.is_empty() {
            None
        } else {
            Some(serde_json::Value::Object(data.details))
        };

        sqlx::query_as::<_, Worker>(
            r#"
            INSERT INTO workers (mine_name, name, role, details)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.mine_name)
        .bind(&data.name)
        .bind(&data.role)
        .bind(details)
        .fetch_one(pool)
        .await
    }

    pub async fn list_by_mine(pool: &PgPool, mine_name: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Worker>(
            "SELECT * FROM workers WHERE mine_name = $1 ORDER BY created_at",
        )
        .bind(mine_name)
        .fetch_all(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM workers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM workers")
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }
}
