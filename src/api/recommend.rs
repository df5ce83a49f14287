use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use super::error_response;
use crate::infrastructure::AppState;
use crate::models::{PageCount, PublicationDate, Recommendation, SearchMode};
use crate::services::recommend_service;

/// Results returned when the caller does not pass `n`
pub const DEFAULT_RECOMMENDATIONS: usize = 5;

pub const NO_RESULTS_MESSAGE: &str =
    "No recommendations found for your query. Please try a different search.";
pub const EMPTY_CATALOG_MESSAGE: &str =
    "No data available to display. Please check the CSV file.";

#[derive(Debug, Deserialize, Clone)]
pub struct RecommendQuery {
    pub q: Option<String>,
    /// "title" or "author"
    pub by: Option<String>,
    pub n: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SuggestQuery {
    pub q: Option<String>,
    pub by: Option<String>,
}

/// One result card as the front end renders it
#[derive(Debug, Serialize)]
pub struct RecommendationView {
    pub rank: usize,
    pub id: usize,
    pub title: String,
    pub authors: String,
    pub similarity: f64,
    pub average_rating: f64,
    pub num_pages: PageCount,
    pub ratings_count: u64,
    /// Thousands-grouped, e.g. "1,234,567"
    pub ratings_count_display: String,
    pub publication_date: PublicationDate,
}

impl RecommendationView {
    fn new(rank: usize, rec: &Recommendation<'_>) -> Self {
        Self {
            rank,
            id: rec.book.id,
            title: rec.book.title.clone(),
            authors: rec.book.authors.clone(),
            similarity: round2(rec.similarity),
            average_rating: round2(rec.book.average_rating),
            num_pages: rec.book.num_pages,
            ratings_count: rec.book.ratings_count,
            ratings_count_display: group_thousands(rec.book.ratings_count),
            publication_date: rec.book.publication_date,
        }
    }
}

/// Bar in the ratings comparison chart
#[derive(Debug, Serialize)]
pub struct RatingBar {
    pub title: String,
    pub average_rating: f64,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub query: String,
    pub mode: SearchMode,
    pub results: Vec<RecommendationView>,
    pub total: usize,
    pub ratings_chart: Vec<RatingBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/recommendations",
    params(
        ("q" = String, Query, description = "Book title or author name to compare against"),
        ("by" = Option<String>, Query, description = "Comparison mode: title (default) or author"),
        ("n" = Option<usize>, Query, description = "Number of recommendations, 1 to the configured maximum")
    ),
    responses(
        (status = 200, description = "Ranked recommendations, possibly empty"),
        (status = 400, description = "Missing query, unknown mode or out-of-range count")
    )
)]
pub async fn get_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendQuery>,
) -> impl IntoResponse {
    let mode = match params.by.as_deref().unwrap_or("title").parse::<SearchMode>() {
        Ok(mode) => mode,
        Err(e) => return error_response(e),
    };

    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Query parameter 'q' is required" })),
        )
            .into_response();
    }

    let max = state.config.max_recommendations;
    let limit = params.n.unwrap_or(DEFAULT_RECOMMENDATIONS.min(max));
    if !(1..=max).contains(&limit) {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": format!("Parameter 'n' must be between 1 and {}", max)
            })),
        )
            .into_response();
    }

    let catalog = state.catalog_repo.snapshot();
    let recs = match recommend_service::recommend(&catalog, &query, mode, limit) {
        Ok(recs) => recs,
        Err(e) => return error_response(e),
    };

    tracing::info!(
        "Recommendations by {} for '{}': {} of {} requested",
        mode,
        query,
        recs.len(),
        limit
    );

    let results: Vec<RecommendationView> = recs
        .iter()
        .enumerate()
        .map(|(i, rec)| RecommendationView::new(i + 1, rec))
        .collect();

    let ratings_chart = results
        .iter()
        .map(|r| RatingBar {
            title: r.title.clone(),
            average_rating: r.average_rating,
        })
        .collect();

    let message = if catalog.is_empty() {
        Some(EMPTY_CATALOG_MESSAGE.to_string())
    } else if results.is_empty() {
        Some(NO_RESULTS_MESSAGE.to_string())
    } else {
        None
    };

    (
        StatusCode::OK,
        Json(RecommendResponse {
            query,
            mode,
            total: results.len(),
            results,
            ratings_chart,
            message,
        }),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/suggestions",
    params(
        ("q" = Option<String>, Query, description = "Text the title or author must contain"),
        ("by" = Option<String>, Query, description = "title (default) or author")
    ),
    responses(
        (status = 200, description = "Distinct matching titles or authors"),
        (status = 400, description = "Unknown mode")
    )
)]
pub async fn get_suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestQuery>,
) -> impl IntoResponse {
    let mode = match params.by.as_deref().unwrap_or("title").parse::<SearchMode>() {
        Ok(mode) => mode,
        Err(e) => return error_response(e),
    };

    let catalog = state.catalog_repo.snapshot();
    let suggestions = recommend_service::suggest(
        &catalog,
        params.q.as_deref().unwrap_or(""),
        mode,
        state.config.suggestion_limit,
    );

    (
        StatusCode::OK,
        Json(serde_json::json!({ "mode": mode, "suggestions": suggestions })),
    )
        .into_response()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a count with comma thousands separators.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
