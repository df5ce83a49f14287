use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::recommend::get_recommendations,
        api::recommend::get_suggestions,
        api::catalog::get_catalog_info,
        api::catalog::reload_catalog,
    ),
    tags(
        (name = "bookbuddy", description = "Book Buddy recommendation API")
    )
)]
pub struct ApiDoc;
