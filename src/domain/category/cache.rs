use super::model::{CategoryEntry, CategoryIndex};
use crate::domain::account::Account;
use crate::infrastructure::cache::CacheStore;
use crate::infrastructure::marketplace::{
    decode, CategoryListPayload, MarketplaceError, PartnerApiClient,
};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Per-shop, per-language cache of the marketplace category taxonomy.
///
/// An index is only ever stored whole. A fetch that fails or returns no usable
/// data leaves whatever is already stored in place.
pub struct CategoryCache {
    partner_api: Arc<PartnerApiClient>,
    store: Arc<dyn CacheStore<Arc<CategoryIndex>>>,
    ttl: Duration,
}

impl CategoryCache {
    pub fn new(
        partner_api: Arc<PartnerApiClient>,
        store: Arc<dyn CacheStore<Arc<CategoryIndex>>>,
        ttl: Duration,
    ) -> Self {
        Self {
            partner_api,
            store,
            ttl,
        }
    }

    pub fn cache_key(shop_id: i64, language: &str) -> String {
        format!("categories_{}_{}", shop_id, language)
    }

    /// Downloads the taxonomy. Unusable replies degrade to an empty list;
    /// transport and rate-limit failures are returned as errors.
    pub async fn fetch_from_api(
        &self,
        account: &Account,
        language: &str,
    ) -> Result<Vec<CategoryEntry>, MarketplaceError> {
        Ok(self
            .fetch_taxonomy(account, language)
            .await?
            .unwrap_or_default())
    }

    pub async fn get_indexed(
        &self,
        account: &Account,
        language: &str,
        force_refresh: bool,
    ) -> Result<Arc<CategoryIndex>, MarketplaceError> {
        let key = Self::cache_key(account.shop_id, language);

        if !force_refresh {
            if let Some(index) = self.store.get(&key).await {
                tracing::debug!(cache_key = %key, categories = index.len(), "Category cache hit");
                return Ok(index);
            }
        }

        tracing::info!(
            cache_key = %key,
            account_id = account.id,
            force_refresh,
            "Loading category taxonomy from partner API"
        );

        match self.fetch_taxonomy(account, language).await? {
            Some(entries) => {
                let index = Arc::new(CategoryIndex::build(entries));
                self.store.set(&key, index.clone(), self.ttl).await;
                tracing::info!(
                    cache_key = %key,
                    categories = index.len(),
                    ttl_secs = self.ttl.as_secs(),
                    "Category taxonomy cached"
                );
                Ok(index)
            }
            None => {
                if let Some(previous) = self.store.get(&key).await {
                    tracing::warn!(cache_key = %key, "Taxonomy refresh failed, keeping cached index");
                    return Ok(previous);
                }
                Ok(Arc::new(CategoryIndex::default()))
            }
        }
    }

    /// Entries for `ids` in input order, skipping ids the taxonomy lacks.
    pub async fn resolve_by_ids(
        &self,
        account: &Account,
        ids: &[i64],
        language: &str,
    ) -> Result<Vec<CategoryEntry>, MarketplaceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let index = self.get_indexed(account, language, false).await?;
        let resolved = index.resolve(ids);

        if resolved.len() < ids.len() {
            tracing::warn!(
                shop_id = account.shop_id,
                language,
                requested = ids.len(),
                resolved = resolved.len(),
                "Some category ids are missing from the taxonomy"
            );
        }

        Ok(resolved)
    }

    pub async fn invalidate(&self, account: &Account, language: &str) {
        let key = Self::cache_key(account.shop_id, language);
        self.store.invalidate(&key).await;
        tracing::info!(cache_key = %key, "Category cache invalidated");
    }

    /// `None` when the partner API gave no usable taxonomy.
    async fn fetch_taxonomy(
        &self,
        account: &Account,
        language: &str,
    ) -> Result<Option<Vec<CategoryEntry>>, MarketplaceError> {
        let response = self.partner_api.get_category(account, language).await?;

        match decode::<CategoryListPayload>(&response) {
            Ok(payload) => Ok(Some(
                payload
                    .category_list
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(CategoryEntry::from_raw)
                    .collect(),
            )),
            Err(e) => {
                tracing::warn!(
                    shop_id = account.shop_id,
                    language,
                    error = %e,
                    "Category taxonomy unavailable"
                );
                Ok(None)
            }
        }
    }
}
