use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::server::{handlers, ServerState};

/// Create the API router.
pub fn create_router(state: Arc<ServerState>) -> Router {
    // Permissive CORS so the frontend can be developed against this server
    // directly.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/recipes",
            get(handlers::list_recipes).post(handlers::create_recipe),
        )
        .route(
            "/recipes/:id",
            get(handlers::get_recipe)
                .put(handlers::update_recipe)
                .delete(handlers::delete_recipe),
        )
        .route("/scrape", post(handlers::scrape_recipe))
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
