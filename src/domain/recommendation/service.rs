use super::error::RecommendationServiceError;
use super::model::RecommendationResult;
use super::RecommendCategoryRequest;
use crate::domain::account::Account;
use crate::domain::category::CategoryCache;
use crate::infrastructure::clock::Clock;
use crate::infrastructure::marketplace::{decode, PartnerApiClient, RecommendPayload};
use crate::infrastructure::repositories::{AccountRepository, RecommendationRepository};
use async_trait::async_trait;
use std::sync::Arc;

/// Width of the history title column.
pub const MAX_TITLE_LENGTH: usize = 255;

pub struct RecommendationService {
    account_repo: Arc<dyn AccountRepository>,
    history_repo: Arc<dyn RecommendationRepository>,
    partner_api: Arc<PartnerApiClient>,
    category_cache: Arc<CategoryCache>,
    clock: Arc<dyn Clock>,
    default_language: String,
}

impl RecommendationService {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        history_repo: Arc<dyn RecommendationRepository>,
        partner_api: Arc<PartnerApiClient>,
        category_cache: Arc<CategoryCache>,
        clock: Arc<dyn Clock>,
        default_language: String,
    ) -> Self {
        Self {
            account_repo,
            history_repo,
            partner_api,
            category_cache,
            clock,
            default_language,
        }
    }
}

#[async_trait]
pub trait RecommendationServiceApi: Send + Sync {
    /// Recommend a marketplace category for a product title
    ///
    /// This operation:
    /// - Validates the title and account id before any I/O
    /// - Asks the partner API for suggested category ids
    /// - Resolves the suggestions against the cached taxonomy
    /// - Records the request in the history store
    ///
    /// An empty or unusable suggestion list yields no category, not an error.
    async fn recommend(
        &self,
        request: RecommendCategoryRequest,
    ) -> Result<RecommendationResult, RecommendationServiceError>;
}

#[async_trait]
impl RecommendationServiceApi for RecommendationService {
    async fn recommend(
        &self,
        request: RecommendCategoryRequest,
    ) -> Result<RecommendationResult, RecommendationServiceError> {
        let (title, account_id) = self.validate(&request)?;
        let language = self.language_for(&request);

        tracing::info!(
            account_id,
            title_length = title.chars().count(),
            language = %language,
            "Category recommendation request"
        );

        // 1. Find account
        let account = self.find_account(account_id).await?;

        // 2. Ask the partner API for suggestions
        let suggested_ids = self.suggested_ids(&account, &title).await?;

        // 3. Resolve suggestions against the taxonomy
        let (category_id, recommended_categories) = match suggested_ids.first() {
            Some(&primary) => {
                let categories = self
                    .category_cache
                    .resolve_by_ids(&account, &suggested_ids, &language)
                    .await?;
                (Some(primary), categories)
            }
            None => (None, Vec::new()),
        };

        // 4. Record history
        let record = self
            .history_repo
            .create(&title, category_id, self.clock.now())
            .await?;

        tracing::info!(
            request_id = record.id,
            account_id,
            category_id = ?category_id,
            suggestions = suggested_ids.len(),
            enriched = recommended_categories.len(),
            "Category recommendation recorded"
        );

        Ok(RecommendationResult::new(record, recommended_categories))
    }
}

impl RecommendationService {
    fn validate(
        &self,
        request: &RecommendCategoryRequest,
    ) -> Result<(String, i64), RecommendationServiceError> {
        let title = request
            .title
            .as_ref()
            .filter(|title| !title.trim().is_empty());
        let account_id = request.account_id.filter(|id| *id != 0);

        let (title, account_id) = match (title, account_id) {
            (Some(title), Some(account_id)) => (title, account_id),
            _ => {
                return Err(RecommendationServiceError::Invalid(
                    "Parameters \"title\" and \"account_id\" are required".to_string(),
                ))
            }
        };

        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(RecommendationServiceError::Invalid(format!(
                "Title must be at most {} characters",
                MAX_TITLE_LENGTH
            )));
        }

        Ok((title.clone(), account_id))
    }

    fn language_for(&self, request: &RecommendCategoryRequest) -> String {
        request
            .language
            .as_deref()
            .map(str::trim)
            .filter(|language| !language.is_empty())
            .unwrap_or(&self.default_language)
            .to_string()
    }

    async fn find_account(&self, account_id: i64) -> Result<Account, RecommendationServiceError> {
        self.account_repo
            .find_by_id(account_id)
            .await?
            .ok_or(RecommendationServiceError::AccountNotFound(account_id))
    }

    async fn suggested_ids(
        &self,
        account: &Account,
        title: &str,
    ) -> Result<Vec<i64>, RecommendationServiceError> {
        let response = self.partner_api.category_recommend(account, title).await?;

        match decode::<RecommendPayload>(&response) {
            Ok(payload) => Ok(payload.category_id.unwrap_or_default()),
            Err(e) => {
                tracing::warn!(
                    account_id = account.id,
                    error = %e,
                    "No usable category recommendation from partner API"
                );
                Ok(Vec::new())
            }
        }
    }
}
