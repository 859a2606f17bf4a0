//! HTTP API over the recipe store: list/read/create/update/delete plus the
//! URL-scrape endpoint. Thin glue over `rfp-format`.

mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use rfp_format::RecipeStore;

use crate::config::Config;

pub struct ServerState {
    pub store: RecipeStore,
    pub config: Config,
}

impl ServerState {
    pub fn new(config: Config) -> ServerState {
        ServerState {
            store: config.store(),
            config,
        }
    }
}

pub async fn serve(config: Config) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api_port));
    let state = Arc::new(ServerState::new(config));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
