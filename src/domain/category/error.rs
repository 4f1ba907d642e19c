use crate::error::AppError;
use crate::infrastructure::marketplace::MarketplaceError;

#[derive(Debug, thiserror::Error)]
pub enum CategoryServiceError {
    #[error("account {0} not found")]
    AccountNotFound(i64),
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error(transparent)]
    Marketplace(#[from] MarketplaceError),
}

impl From<AppError> for CategoryServiceError {
    fn from(err: AppError) -> Self {
        CategoryServiceError::Dependency(err.to_string())
    }
}

impl From<CategoryServiceError> for AppError {
    fn from(err: CategoryServiceError) -> Self {
        match err {
            CategoryServiceError::AccountNotFound(id) => {
                AppError::NotFound(format!("Marketplace account {} not found", id))
            }
            CategoryServiceError::Dependency(msg) => AppError::Internal(msg),
            CategoryServiceError::Marketplace(e) => e.into(),
        }
    }
}
