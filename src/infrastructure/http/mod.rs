use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;
use crate::{
    controllers::{
        category::CategoryController, health, recommendation::RecommendationController,
    },
    infrastructure::middleware::request_id_middleware,
};

/// Build the application router with all routes configured
pub fn build_router(
    pool: Arc<DbPool>,
    recommendation_controller: Arc<RecommendationController>,
    category_controller: Arc<CategoryController>,
) -> Router {
    // Recommendation routes
    let recommendation_routes = Router::new()
        .route(
            "/api/category/recommend",
            post(RecommendationController::recommend),
        )
        .with_state(recommendation_controller);

    // Taxonomy cache routes
    let category_routes = Router::new()
        .route(
            "/api/accounts/:account_id/categories",
            get(CategoryController::list_categories)
                .delete(CategoryController::invalidate_categories),
        )
        .with_state(category_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .merge(recommendation_routes)
        .merge(category_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
