use crate::domain::recommendation::RecommendationRecord;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Append-only history of recommendation requests.
#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    async fn create(
        &self,
        title: &str,
        category_id: Option<i64>,
        requested_at: DateTime<Utc>,
    ) -> AppResult<RecommendationRecord>;
}

pub struct PgRecommendationRepository {
    pool: Arc<DbPool>,
}

impl PgRecommendationRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecommendationRepository for PgRecommendationRepository {
    async fn create(
        &self,
        title: &str,
        category_id: Option<i64>,
        requested_at: DateTime<Utc>,
    ) -> AppResult<RecommendationRecord> {
        let pool = self.pool.as_ref();
        let record = sqlx::query_as::<_, RecommendationRecord>(
            r#"
            INSERT INTO category_requests (title, category_id, requested_at)
            VALUES ($1, $2, $3)
            RETURNING id, title, category_id, requested_at
            "#,
        )
        .bind(title)
        .bind(category_id)
        .bind(requested_at)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }
}
