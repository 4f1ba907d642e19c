use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use category_recommender::controllers::{
    category::CategoryController, recommendation::RecommendationController,
};
use category_recommender::domain::category::{CategoryCache, CategoryIndex, CategoryService};
use category_recommender::domain::recommendation::RecommendationService;
use category_recommender::infrastructure::cache::MokaCacheStore;
use category_recommender::infrastructure::clock::{Clock, SystemClock};
use category_recommender::infrastructure::config::{Config, LogFormat};
use category_recommender::infrastructure::db::{check_connection, create_pool, run_migrations};
use category_recommender::infrastructure::http::{build_router, start_http_server};
use category_recommender::infrastructure::marketplace::{
    PartnerApiClient, RateLimitedTransport, ReqwestTransport,
};
use category_recommender::infrastructure::repositories::{
    AccountRepository, PgAccountRepository, PgRecommendationRepository, RecommendationRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        "Starting category recommender on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let retry_policy = config.retry_policy();
    tracing::info!(
        base_url = %config.marketplace_base_url,
        max_attempts = retry_policy.max_attempts,
        base_delay_ms = retry_policy.base_delay.as_millis() as u64,
        max_delay_ms = retry_policy.max_delay.as_millis() as u64,
        cache_ttl_secs = config.category_cache_ttl_secs,
        default_language = %config.default_language,
        "Partner API configuration loaded"
    );

    let pool = Arc::new(pool);
    let config = Arc::new(config);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject db pool)
    tracing::info!("Instantiating repositories...");
    let account_repo: Arc<dyn AccountRepository> =
        Arc::new(PgAccountRepository::new(pool.clone()));
    let history_repo: Arc<dyn RecommendationRepository> =
        Arc::new(PgRecommendationRepository::new(pool.clone()));

    // 2. Instantiate partner API client and taxonomy cache
    tracing::info!("Instantiating partner API client...");
    let transport = RateLimitedTransport::new(
        Arc::new(ReqwestTransport::new(config.marketplace_timeout())?),
        retry_policy,
    );
    let partner_api = Arc::new(PartnerApiClient::new(
        config.marketplace_base_url.clone(),
        transport,
        clock.clone(),
    ));
    let category_store: Arc<MokaCacheStore<Arc<CategoryIndex>>> = Arc::new(MokaCacheStore::new(
        config.category_cache_max_capacity,
        clock.clone(),
    ));
    let category_cache = Arc::new(CategoryCache::new(
        partner_api.clone(),
        category_store,
        config.category_cache_ttl(),
    ));

    // 3. Instantiate services (inject repositories and clients)
    tracing::info!("Instantiating services...");
    let recommendation_service = Arc::new(RecommendationService::new(
        account_repo.clone(),
        history_repo,
        partner_api,
        category_cache.clone(),
        clock,
        config.default_language.clone(),
    ));
    let category_service = Arc::new(CategoryService::new(
        account_repo,
        category_cache,
        config.default_language.clone(),
    ));

    // 4. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let recommendation_controller = Arc::new(RecommendationController::new(recommendation_service));
    let category_controller = Arc::new(CategoryController::new(category_service));

    // Start HTTP server with all routes
    let app = build_router(pool, recommendation_controller, category_controller);
    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "category_recommender=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
