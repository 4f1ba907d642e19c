use super::cache::CategoryCache;
use super::error::CategoryServiceError;
use super::CategoryListResponse;
use crate::domain::account::Account;
use crate::infrastructure::repositories::AccountRepository;
use async_trait::async_trait;
use std::sync::Arc;

pub struct CategoryService {
    account_repo: Arc<dyn AccountRepository>,
    category_cache: Arc<CategoryCache>,
    default_language: String,
}

impl CategoryService {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        category_cache: Arc<CategoryCache>,
        default_language: String,
    ) -> Self {
        Self {
            account_repo,
            category_cache,
            default_language,
        }
    }
}

#[async_trait]
pub trait CategoryServiceApi: Send + Sync {
    /// Cached taxonomy for an account's shop; `refresh` refetches it first.
    async fn list_categories(
        &self,
        account_id: i64,
        language: Option<String>,
        refresh: bool,
    ) -> Result<CategoryListResponse, CategoryServiceError>;

    /// Drops the cached taxonomy so the next lookup refetches it.
    async fn invalidate(
        &self,
        account_id: i64,
        language: Option<String>,
    ) -> Result<(), CategoryServiceError>;
}

#[async_trait]
impl CategoryServiceApi for CategoryService {
    async fn list_categories(
        &self,
        account_id: i64,
        language: Option<String>,
        refresh: bool,
    ) -> Result<CategoryListResponse, CategoryServiceError> {
        let account = self.find_account(account_id).await?;
        let language = self.language_or_default(language);

        let index = self
            .category_cache
            .get_indexed(&account, &language, refresh)
            .await?;

        Ok(CategoryListResponse {
            account_id,
            shop_id: account.shop_id,
            language,
            categories: index.entries().to_vec(),
        })
    }

    async fn invalidate(
        &self,
        account_id: i64,
        language: Option<String>,
    ) -> Result<(), CategoryServiceError> {
        let account = self.find_account(account_id).await?;
        let language = self.language_or_default(language);

        self.category_cache.invalidate(&account, &language).await;

        Ok(())
    }
}

impl CategoryService {
    async fn find_account(&self, account_id: i64) -> Result<Account, CategoryServiceError> {
        self.account_repo
            .find_by_id(account_id)
            .await?
            .ok_or(CategoryServiceError::AccountNotFound(account_id))
    }

    fn language_or_default(&self, language: Option<String>) -> String {
        language
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.default_language.clone())
    }
}
