use crate::domain::category::CategoryEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Persisted history row for one recommendation call.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRecord {
    pub id: i64,
    pub title: String,
    pub category_id: Option<i64>,
    pub requested_at: DateTime<Utc>,
}

/// Outcome of one recommendation call, with the suggested categories resolved
/// against the taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    pub id: i64,
    pub title: String,
    pub category_id: Option<i64>,
    pub requested_at: DateTime<Utc>,
    pub recommended_categories: Vec<CategoryEntry>,
}

impl RecommendationResult {
    pub fn new(record: RecommendationRecord, recommended_categories: Vec<CategoryEntry>) -> Self {
        Self {
            id: record.id,
            title: record.title,
            category_id: record.category_id,
            requested_at: record.requested_at,
            recommended_categories,
        }
    }
}
