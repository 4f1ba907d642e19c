pub mod error;
pub mod model;
pub mod service;

pub use error::RecommendationServiceError;
pub use model::{RecommendationRecord, RecommendationResult};
pub use service::{RecommendationService, RecommendationServiceApi};

use serde::{Deserialize, Serialize};

/// Request for a category recommendation.
///
/// Fields are optional so that missing values reach validation instead of
/// failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendCategoryRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub account_id: Option<i64>,
    /// Taxonomy language for the enrichment; defaults to the configured one.
    #[serde(default)]
    pub language: Option<String>,
}
