use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rfp_format::Recipe;
use serde::Deserialize;
use tracing::info;

use crate::server::ServerState;

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
    #[serde(default)]
    pub save: bool,
}

fn error_response(status: StatusCode, error: &str, message: impl std::fmt::Display) -> Response {
    let body = serde_json::json!({
        "error": error,
        "message": message.to_string(),
    });
    (status, Json(body)).into_response()
}

/// GET /recipes
pub async fn list_recipes(State(state): State<Arc<ServerState>>) -> Response {
    match state.store.list() {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "list_failed", e),
    }
}

/// GET /recipes/:id
pub async fn get_recipe(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Response {
    match state.store.get(&id) {
        Ok(recipe) => (StatusCode::OK, Json(recipe)).into_response(),
        Err(e) => error_response(StatusCode::NOT_FOUND, "not_found", e),
    }
}

/// POST /recipes
pub async fn create_recipe(
    State(state): State<Arc<ServerState>>,
    Json(recipe): Json<Recipe>,
) -> Response {
    if recipe.name.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "invalid_recipe", "recipe name is required");
    }
    match state.store.put(&recipe) {
        Ok(id) => {
            info!(id, "created recipe");
            let body = serde_json::json!({
                "message": "recipe created",
                "id": id,
            });
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(e @ rfp_format::Error::EmptyName(_)) => {
            error_response(StatusCode::BAD_REQUEST, "invalid_recipe", e)
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "save_failed", e),
    }
}

/// PUT /recipes/:id
pub async fn update_recipe(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Json(recipe): Json<Recipe>,
) -> Response {
    if !state.store.exists(&id) {
        return error_response(StatusCode::NOT_FOUND, "not_found", format!("no recipe {id:?}"));
    }
    match state.store.put_with_id(&id, &recipe) {
        Ok(()) => {
            info!(id, "updated recipe");
            let body = serde_json::json!({
                "message": "recipe updated",
                "id": id,
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "save_failed", e),
    }
}

/// DELETE /recipes/:id
pub async fn delete_recipe(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Response {
    if !state.store.exists(&id) {
        return error_response(StatusCode::NOT_FOUND, "not_found", format!("no recipe {id:?}"));
    }
    match state.store.delete(&id) {
        Ok(()) => {
            info!(id, "deleted recipe");
            let body = serde_json::json!({
                "message": "recipe deleted",
                "id": id,
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, "delete_failed", e),
    }
}

/// POST /scrape
pub async fn scrape_recipe(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ScrapeRequest>,
) -> Response {
    info!(url = %request.url, save = request.save, "scrape request");

    let recipe = match crate::scrape::scrape(&request.url, &state.config.image_dir).await {
        Ok(recipe) => recipe,
        Err(e) => return error_response(StatusCode::BAD_GATEWAY, "scrape_failed", e),
    };

    let id = if request.save {
        match state.store.put(&recipe) {
            Ok(id) => Some(id),
            Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, "save_failed", e),
        }
    } else {
        None
    };

    let body = serde_json::json!({
        "id": id,
        "recipe": recipe,
    });
    (StatusCode::OK, Json(body)).into_response()
}
