pub mod cache;
pub mod error;
pub mod model;
pub mod service;

pub use cache::{CategoryCache, DEFAULT_CACHE_TTL};
pub use error::CategoryServiceError;
pub use model::{CategoryEntry, CategoryIndex};
pub use service::{CategoryService, CategoryServiceApi};

use serde::{Deserialize, Serialize};

/// Cached taxonomy of one shop in one language.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub account_id: i64,
    pub shop_id: i64,
    pub language: String,
    pub categories: Vec<CategoryEntry>,
}
