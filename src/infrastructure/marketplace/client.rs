use super::error::MarketplaceError;
use super::signer;
use super::transport::{RateLimitedTransport, TransportResponse};
use crate::domain::account::Account;
use crate::infrastructure::clock::Clock;
use std::sync::Arc;

pub const PRODUCTION_BASE_URL: &str = "https://partner.shopeemobile.com";
pub const SANDBOX_BASE_URL: &str = "https://partner.test-stable.shopeemobile.com";

pub const GET_CATEGORY_PATH: &str = "/api/v2/product/get_category";
pub const CATEGORY_RECOMMEND_PATH: &str = "/api/v2/product/category_recommend";

/// Signed calls to the marketplace partner API.
pub struct PartnerApiClient {
    base_url: String,
    transport: RateLimitedTransport,
    clock: Arc<dyn Clock>,
}

impl PartnerApiClient {
    pub fn new(base_url: String, transport: RateLimitedTransport, clock: Arc<dyn Clock>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            clock,
        }
    }

    /// Full category taxonomy of the account's shop in `language`.
    pub async fn get_category(
        &self,
        account: &Account,
        language: &str,
    ) -> Result<TransportResponse, MarketplaceError> {
        self.signed_get(
            account,
            GET_CATEGORY_PATH,
            vec![("language", language.to_string())],
        )
        .await
    }

    /// Suggested category ids for a product title.
    pub async fn category_recommend(
        &self,
        account: &Account,
        item_name: &str,
    ) -> Result<TransportResponse, MarketplaceError> {
        self.signed_get(
            account,
            CATEGORY_RECOMMEND_PATH,
            vec![("item_name", item_name.to_string())],
        )
        .await
    }

    async fn signed_get(
        &self,
        account: &Account,
        path: &str,
        extra_params: Vec<(&'static str, String)>,
    ) -> Result<TransportResponse, MarketplaceError> {
        let timestamp = self.clock.now().timestamp();
        let mut params = signer::signed_params(account, path, timestamp)?;
        params.extend(extra_params);

        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(
            path = path,
            account_id = account.id,
            shop_id = account.shop_id,
            timestamp,
            "Calling partner API"
        );

        let response = self.transport.get(&url, &params).await?;

        tracing::debug!(
            path = path,
            status = response.status,
            "Partner API responded"
        );

        Ok(response)
    }
}
