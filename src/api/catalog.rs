use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use super::error_response;
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::services::catalog_service;

#[utoipa::path(
    get,
    path = "/api/catalog",
    responses(
        (status = 200, description = "Size and source of the loaded catalog")
    )
)]
pub async fn get_catalog_info(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog_repo.snapshot();
    Json(serde_json::json!({
        "books": catalog.len(),
        "source": state.config.catalog_path.display().to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/catalog/reload",
    responses(
        (status = 200, description = "Catalog rebuilt from source and swapped in"),
        (status = 500, description = "Source unreadable; previous catalog kept")
    )
)]
pub async fn reload_catalog(State(state): State<AppState>) -> impl IntoResponse {
    let repo = state.catalog_repo.clone();
    let path = state.config.catalog_path.clone();

    let result = tokio::task::spawn_blocking(move || catalog_service::reload_catalog(&*repo, &path))
        .await
        .unwrap_or_else(|e| Err(DomainError::Internal(format!("reload task failed: {}", e))));

    match result {
        Ok(count) => (
            StatusCode::OK,
            Json(serde_json::json!({ "reloaded": true, "books": count })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Catalog reload failed: {}", e);
            error_response(e)
        }
    }
}
