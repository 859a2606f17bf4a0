//! Static frontend server: serves built assets with an SPA fallback and
//! reverse-proxies `/api/*` to the API server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::config::Config;

struct ProxyState {
    client: reqwest::Client,
    api_base: String,
}

pub async fn serve(config: Config) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.web_port));
    let state = Arc::new(ProxyState {
        client: reqwest::Client::new(),
        api_base: format!("http://127.0.0.1:{}", config.api_port),
    });

    let index = config.static_dir.join("index.html");
    let static_files = ServeDir::new(&config.static_dir).fallback(ServeFile::new(index));

    let app = Router::new()
        .route("/api", any(proxy))
        .route("/api/", any(proxy))
        .route("/api/*path", any(proxy))
        .fallback_service(static_files)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, assets = %config.static_dir.display(), api = %config.api_port, "frontend server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Forward a request to the API server with the `/api` prefix stripped,
/// preserving method, headers and body.
async fn proxy(State(state): State<Arc<ProxyState>>, request: Request) -> Response {
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let stripped = path_and_query.strip_prefix("/api").unwrap_or(path_and_query);
    let stripped = if stripped.is_empty() { "/" } else { stripped };
    let target = format!("{}{}", state.api_base, stripped);

    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, 16 * 1024 * 1024).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, format!("unreadable request body: {e}"))
                .into_response()
        }
    };

    let mut headers = parts.headers;
    headers.remove(header::HOST);

    let upstream = state
        .client
        .request(parts.method, &target)
        .headers(headers)
        .body(body)
        .send()
        .await;

    match upstream {
        Ok(upstream) => {
            let status = upstream.status();
            let mut headers = upstream.headers().clone();
            headers.remove(header::TRANSFER_ENCODING);
            headers.remove(header::CONTENT_LENGTH);

            match upstream.bytes().await {
                Ok(bytes) => (status, headers, Body::from(bytes)).into_response(),
                Err(e) => (
                    StatusCode::BAD_GATEWAY,
                    format!("error reading API response: {e}"),
                )
                    .into_response(),
            }
        }
        Err(e) => {
            tracing::warn!(%target, %e, "API server unreachable");
            (StatusCode::BAD_GATEWAY, format!("API server unreachable: {e}")).into_response()
        }
    }
}
