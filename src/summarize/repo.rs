use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// One record per successful summarization request. Written once, never
/// updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Summary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub summary: String,
    pub mode: String,
    pub created_at: OffsetDateTime,
}

impl Summary {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        content: &str,
        summary: &str,
        mode: &str,
    ) -> anyhow::Result<Summary> {
        let record = sqlx::query_as::<_, Summary>(
            r#"
            INSERT INTO summaries (user_id, content, summary, mode)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, content, summary, mode, created_at
            "#,
        )
        .bind(user_id)
        .bind(content)
        .bind(summary)
        .bind(mode)
        .fetch_one(db)
        .await?;
        Ok(record)
    }

    pub async fn list_by_user(
        db: &PgPool,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Summary>> {
        let rows = sqlx::query_as::<_, Summary>(
            r#"
            SELECT id, user_id, content, summary, mode, created_at
            FROM summaries
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn get_for_user(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<Summary>> {
        let row = sqlx::query_as::<_, Summary>(
            r#"
            SELECT id, user_id, content, summary, mode, created_at
            FROM summaries
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }
}
