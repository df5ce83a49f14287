pub mod catalog;
pub mod health;
pub mod recommend;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::domain::DomainError;
use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Recommendations
        .route("/recommendations", get(recommend::get_recommendations))
        .route("/suggestions", get(recommend::get_suggestions))
        // Catalog lifecycle
        .route("/catalog", get(catalog::get_catalog_info))
        .route("/catalog/reload", post(catalog::reload_catalog))
        .with_state(state)
}

/// Map a domain error to a JSON error response
pub fn error_response(err: DomainError) -> Response {
    let status = match err {
        DomainError::ContractViolation(_) => StatusCode::BAD_REQUEST,
        DomainError::Ingest(_) | DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}
