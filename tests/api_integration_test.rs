use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use bookbuddy::config::Config;
use bookbuddy::import::parse_catalog_csv;
use bookbuddy::infrastructure::AppState;
use bookbuddy::server::build_router;
use bookbuddy::services::normalize;
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

const CATALOG_CSV: &str = "\
bookID,title,authors,average_rating,isbn,  num_pages,ratings_count,publication_date
1,Dune (Dune Chronicles #1),Frank Herbert,4.25,0441013597,604,1000000,8/1/1965
2,Dune Messiah (Dune Chronicles #2),Frank Herbert,3.88,0441172695,,120453,7/15/1987
3,Children of Dune,Frank Herbert,3.93,0441104029,444,98000,not a date
4,Emma,Jane Austen,4.01,0141439580,474,600000,5/1/2003
5,broken row,with too few fields
6,Good Omens,Terry Pratchett/Neil Gaiman,4.25,0060853980,412,500000,11/28/2006
7,,Nobody,3.0,0000000000,10,1,1/1/2000
";

// Helper to create a test app state from the fixture catalog
fn setup_test_state() -> AppState {
    let records = parse_catalog_csv(CATALOG_CSV.as_bytes()).expect("Failed to parse fixture");
    AppState::new(Config::default(), normalize(records))
}

fn setup_app() -> Router {
    build_router(setup_test_state())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn result_titles(body: &Value) -> Vec<String> {
    body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = get_json(setup_app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_catalog_info_counts_valid_books_only() {
    let (status, body) = get_json(setup_app(), "/api/catalog").await;
    assert_eq!(status, StatusCode::OK);
    // Malformed row 5 and title-less row 7 are gone
    assert_eq!(body["books"], 5);
}

#[tokio::test]
async fn test_title_recommendations_exclude_queried_book() {
    let (status, body) = get_json(setup_app(), "/api/recommendations?q=Dune&by=title&n=5").await;
    assert_eq!(status, StatusCode::OK);

    let titles = result_titles(&body);
    assert!(!titles.iter().any(|t| t == "Dune (Dune Chronicles #1)"));
    assert_eq!(titles[0], "Dune Messiah (Dune Chronicles #2)");
    assert_eq!(body["total"], titles.len());
    assert_eq!(body["mode"], "title");

    let first = &body["results"][0];
    assert_eq!(first["rank"], 1);
    assert_eq!(first["similarity"], 0.5);
    assert_eq!(first["num_pages"], "unknown");
    assert_eq!(first["ratings_count_display"], "120,453");
    assert_eq!(first["publication_date"], "1987-07-15");
}

#[tokio::test]
async fn test_author_recommendations_rank_by_rating() {
    let (status, body) =
        get_json(setup_app(), "/api/recommendations?q=Frank%20Herbert&by=author&n=3").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        result_titles(&body),
        vec![
            "Dune (Dune Chronicles #1)",
            "Children of Dune",
            "Dune Messiah (Dune Chronicles #2)"
        ]
    );
    assert_eq!(body["results"][0]["similarity"], 1.0);
    assert_eq!(body["results"][0]["ratings_count_display"], "1,000,000");
    assert_eq!(body["results"][1]["publication_date"], "unknown");

    let chart = body["ratings_chart"].as_array().unwrap();
    assert_eq!(chart.len(), 3);
    assert_eq!(chart[0]["average_rating"], 4.25);
}

#[tokio::test]
async fn test_recommendations_default_mode_and_count() {
    let (status, body) = get_json(setup_app(), "/api/recommendations?q=Good%20Omen").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "title");
    assert_eq!(body["total"], 5);
    assert_eq!(body["results"][0]["title"], "Good Omens");
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_no_results_carries_message() {
    let csv = "title,authors,average_rating\nDune,Frank Herbert,4.25\n";
    let state = AppState::new(
        Config::default(),
        normalize(parse_catalog_csv(csv.as_bytes()).unwrap()),
    );

    let (status, body) = get_json(build_router(state), "/api/recommendations?q=dune").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert!(body["message"].as_str().unwrap().starts_with("No recommendations found"));
}

#[tokio::test]
async fn test_suggestions() {
    let (status, body) = get_json(setup_app(), "/api/suggestions?q=dune").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 3);

    let (status, body) = get_json(setup_app(), "/api/suggestions?q=gaiman&by=author").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"][0], "Terry Pratchett/Neil Gaiman");
}

#[tokio::test]
async fn test_reload_swaps_catalog() {
    let path = std::env::temp_dir().join(format!("bookbuddy_reload_{}.csv", std::process::id()));
    std::fs::write(&path, CATALOG_CSV).unwrap();

    let state = AppState::new(
        Config {
            catalog_path: path.clone(),
            ..Config::default()
        },
        bookbuddy::models::Catalog::empty(),
    );
    let app = build_router(state);

    let (_, body) = get_json(app.clone(), "/api/catalog").await;
    assert_eq!(body["books"], 0);

    let req = Request::builder()
        .uri("/api/catalog/reload")
        .method("POST")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, body) = get_json(app, "/api/catalog").await;
    assert_eq!(body["books"], 5);

    std::fs::remove_file(&path).ok();
}
