use crate::error::AppError;
use crate::infrastructure::marketplace::MarketplaceError;

#[derive(Debug, thiserror::Error)]
pub enum RecommendationServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("account {0} not found")]
    AccountNotFound(i64),
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error(transparent)]
    Marketplace(#[from] MarketplaceError),
}

impl From<AppError> for RecommendationServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => RecommendationServiceError::Invalid(msg),
            _ => RecommendationServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<RecommendationServiceError> for AppError {
    fn from(err: RecommendationServiceError) -> Self {
        match err {
            RecommendationServiceError::Invalid(msg) => AppError::BadRequest(msg),
            RecommendationServiceError::AccountNotFound(id) => {
                AppError::NotFound(format!("Marketplace account {} not found", id))
            }
            RecommendationServiceError::Dependency(msg) => AppError::Internal(msg),
            RecommendationServiceError::Marketplace(e) => e.into(),
        }
    }
}
