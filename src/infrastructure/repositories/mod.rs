pub mod account_repository;
pub mod recommendation_repository;

pub use account_repository::{AccountRepository, PgAccountRepository};
pub use recommendation_repository::{PgRecommendationRepository, RecommendationRepository};
