use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::recommendation::{
        RecommendCategoryRequest, RecommendationResult, RecommendationService,
        RecommendationServiceApi,
    },
    error::AppResult,
};

pub struct RecommendationController {
    recommendation_service: Arc<RecommendationService>,
}

impl RecommendationController {
    pub fn new(recommendation_service: Arc<RecommendationService>) -> Self {
        Self {
            recommendation_service,
        }
    }

    /// POST /api/category/recommend - Recommend a category for a product title
    pub async fn recommend(
        State(controller): State<Arc<RecommendationController>>,
        Json(request): Json<RecommendCategoryRequest>,
    ) -> AppResult<Json<RecommendationResult>> {
        let result = controller
            .recommendation_service
            .recommend(request)
            .await?;
        Ok(Json(result))
    }
}
