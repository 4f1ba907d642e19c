use super::error::MarketplaceError;
use super::retry::{retry, RetryPolicy};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub const TOO_MANY_REQUESTS: u16 = 429;

/// Status and decoded JSON body of a partner API call.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    /// `None` when the body was empty or not JSON.
    pub body: Option<Value>,
}

/// Network-level failure of a partner API call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// Raw HTTP GET against the partner API.
///
/// Implementations report network-level failures (timeouts, refused
/// connections, broken bodies) as `Err`. Every HTTP status, including errors,
/// is an `Ok` response.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<TransportResponse, TransportError>;
}

pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("category-recommender")
            .build()?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<TransportResponse, TransportError> {
        let response = self.http_client.get(url).query(params).send().await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).ok();

        Ok(TransportResponse { status, body })
    }
}

/// Retries calls that the partner API throttles with HTTP 429.
///
/// Other statuses are handed back untouched. Network failures are not retried.
pub struct RateLimitedTransport {
    inner: Arc<dyn HttpTransport>,
    policy: RetryPolicy,
}

impl RateLimitedTransport {
    pub fn new(inner: Arc<dyn HttpTransport>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub async fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<TransportResponse, MarketplaceError> {
        retry(&self.policy, MarketplaceError::is_rate_limited, |attempt| async move {
            let response = self.inner.get(url, params).await.map_err(|source| {
                tracing::error!(url = %url, error = %source, "Partner API request failed");
                MarketplaceError::Transport {
                    url: url.to_string(),
                    source,
                }
            })?;

            if response.status == TOO_MANY_REQUESTS {
                tracing::warn!(
                    url = %url,
                    attempt,
                    max_attempts = self.policy.max_attempts,
                    "Partner API rate limit hit"
                );
                return Err(MarketplaceError::RateLimited {
                    url: url.to_string(),
                    attempts: attempt,
                });
            }

            Ok(response)
        })
        .await
    }
}
