use super::signer::SignerError;
use super::transport::TransportError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    #[error("partner API rate limit at {url} persisted after {attempts} attempts")]
    RateLimited { url: String, attempts: u32 },
    #[error("partner API request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },
    #[error(transparent)]
    Signing(#[from] SignerError),
}

impl MarketplaceError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

impl From<MarketplaceError> for AppError {
    fn from(err: MarketplaceError) -> Self {
        match err {
            MarketplaceError::Signing(e) => {
                AppError::Internal(format!("Account configuration error: {}", e))
            }
            other => AppError::ExternalService(other.to_string()),
        }
    }
}
