//! Assessment model
//!
//! Persisted risk assessments. The `record` column holds the merged audit
//! document (raw input fields plus computed verdict, computed wins); the
//! typed columns exist for filtering and dashboard counts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use crate::logic::risk::RiskAssessment;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assessment {
    pub id: Uuid,
    pub mine_name: Option<String>,
    pub risk_level: String,
    pub risk_score: i32,
    pub confidence: i32,
    pub record: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl Assessment {
    pub async fn insert(
        pool: &PgPool,
        mine_name: Option<&str>,
        assessment: &RiskAssessment,
        record: serde_json::Value,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Assessment>(
            r#"
            INSERT INTO assessments (mine_name, risk_level, risk_score, confidence, record, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(mine_name)
        .bind(assessment.risk_level.as_str())
        .bind(assessment.risk_score)
        .bind(assessment.confidence)
        .bind(record)
        .bind(assessment.timestamp)
        .fetch_one(pool)
        .await
    }

    /// Newest-first history, optionally scoped to one mine.
    pub async fn history(
        pool: &PgPool,
        mine_name: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        match mine_name {
            Some(mine) => {
                sqlx::query_as::<_, Assessment>(
                    r#"
                    SELECT * FROM assessments
                    WHERE mine_name = $1
                    ORDER BY created_at DESC
                    LIMIT $2
                    "#,
                )
                .bind(mine)
                .bind(limit)
                .fetch_all(pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Assessment>(
                    "SELECT * FROM assessments ORDER BY created_at DESC LIMIT $1",
                )
                .bind(limit)
                .fetch_all(pool)
                .await
            }
        }
    }

    pub async fn delete_by_id(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assessments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Bulk delete, optionally scoped to one mine. Returns the count removed.
    pub async fn clear(pool: &PgPool, mine_name: Option<&str>) -> Result<u64, sqlx::Error> {
        let result = match mine_name {
            Some(mine) => {
                sqlx::query("DELETE FROM assessments WHERE mine_name = $1")
                    .bind(mine)
                    .execute(pool)
                    .await?
            }
            None => sqlx::query("DELETE FROM assessments").execute(pool).await?,
        };
        Ok(result.rows_affected())
    }

    /// (total assessments, High-risk assessments) for the dashboard.
    pub async fn counts(pool: &PgPool) -> Result<(i64, i64), sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE risk_level = 'High') as high_risk
            FROM assessments
            "#,
        )
        .fetch_one(pool)
        .await?;

        Ok((row.get("total"), row.get("high_risk")))
    }
}
