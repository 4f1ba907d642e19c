pub mod client;
pub mod envelope;
pub mod error;
pub mod retry;
pub mod signer;
pub mod transport;


pub use client::{
    PartnerApiClient, CATEGORY_RECOMMEND_PATH, GET_CATEGORY_PATH, PRODUCTION_BASE_URL,
    SANDBOX_BASE_URL,
};
pub use envelope::{decode, CategoryListPayload, RawCategory, RecommendPayload, UpstreamDataError};
pub use error::MarketplaceError;
pub use retry::RetryPolicy;
pub use signer::SignerError;
pub use transport::{
    HttpTransport, RateLimitedTransport, ReqwestTransport, TransportError, TransportResponse,
};
