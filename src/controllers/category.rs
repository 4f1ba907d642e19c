use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    domain::category::{CategoryListResponse, CategoryService, CategoryServiceApi},
    error::AppResult,
};

// Request DTOs
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub refresh: bool,
}

pub struct CategoryController {
    category_service: Arc<CategoryService>,
}

impl CategoryController {
    pub fn new(category_service: Arc<CategoryService>) -> Self {
        Self { category_service }
    }

    /// GET /api/accounts/{accountId}/categories - Cached taxonomy of the account's shop
    /// `refresh=true` refetches it from the partner API first.
    pub async fn list_categories(
        State(controller): State<Arc<CategoryController>>,
        Path(account_id): Path<i64>,
        Query(query): Query<CategoryQuery>,
    ) -> AppResult<Json<CategoryListResponse>> {
        let categories = controller
            .category_service
            .list_categories(account_id, query.language, query.refresh)
            .await?;
        Ok(Json(categories))
    }

    /// DELETE /api/accounts/{accountId}/categories - Invalidate the cached taxonomy
    pub async fn invalidate_categories(
        State(controller): State<Arc<CategoryController>>,
        Path(account_id): Path<i64>,
        Query(query): Query<CategoryQuery>,
    ) -> AppResult<StatusCode> {
        controller
            .category_service
            .invalidate(account_id, query.language)
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }
}
