use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use gift_finder_api::api::{create_router, AppState, ResultLimits};
use gift_finder_api::services::{FallbackCatalog, JsonFileCatalog, StaticCatalog};

fn create_test_server() -> TestServer {
    let state = AppState::with_sample_catalog().unwrap();
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn ids(body: &Value) -> Vec<String> {
    body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

fn scores(body: &Value) -> Vec<u64> {
    body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["score"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("quiz-123"),
        )
        .await;
    assert_eq!(response.headers().get("x-request-id").unwrap(), "quiz-123");
}

#[tokio::test]
async fn test_request_id_generated_when_missing() {
    let server = create_test_server();
    let response = server.get("/health").await;
    assert!(response.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn test_quiz_submit_filters_budget_and_ranks() {
    let server = create_test_server();

    let response = server
        .post("/api/quiz/submit")
        .json(&json!({
            "answers": {
                "interests": ["tech"],
                "budget": "under-25"
            }
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();

    let ids = ids(&body);
    assert_eq!(ids.len(), 5);
    assert_eq!(ids[0], "gift-001");
    assert!(!ids.contains(&"gift-004".to_string()));
    assert_eq!(body["total"], 5);

    let scores = scores(&body);
    assert_eq!(scores[0], 55);
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(scores.iter().all(|s| *s <= 100));
}

#[tokio::test]
async fn test_quiz_submit_respects_limit() {
    let server = create_test_server();

    let response = server
        .post("/api/quiz/submit")
        .json(&json!({
            "answers": { "relationship": "partner", "occasion": "anniversary" },
            "limit": 2
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body).len(), 2);
}

#[tokio::test]
async fn test_quiz_submit_default_limit() {
    let server = create_test_server();

    let response = server
        .post("/api/quiz/submit")
        .json(&json!({ "answers": { "interests": ["wellness", "reading"] } }))
        .await;

    let body: Value = response.json();
    assert_eq!(ids(&body).len(), ResultLimits::default().quiz);
}

#[tokio::test]
async fn test_quiz_submit_tolerates_unknown_answers() {
    let server = create_test_server();

    let response = server
        .post("/api/quiz/submit")
        .json(&json!({
            "answers": {
                "favoriteColor": "green",
                "age": 34,
                "extras": { "nested": true }
            }
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(!ids(&body).is_empty());
}

#[tokio::test]
async fn test_quiz_submit_without_answers_ranks_by_quality() {
    let server = create_test_server();

    let response = server
        .post("/api/quiz/submit")
        .json(&json!({ "answers": {} }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body).len(), ResultLimits::default().quiz);
}

#[tokio::test]
async fn test_quiz_submit_rejects_malformed_body() {
    let server = create_test_server();

    let response = server
        .post("/api/quiz/submit")
        .json(&json!({ "answers": "tech please", "limit": "six" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_quiz_never_returns_inactive_items() {
    let server = create_test_server();

    let response = server
        .post("/api/quiz/submit")
        .json(&json!({
            "answers": { "interests": ["fitness", "tech"] },
            "limit": 50
        }))
        .await;

    let body: Value = response.json();
    assert!(!ids(&body).contains(&"gift-016".to_string()));
}

#[tokio::test]
async fn test_search_with_backfill() {
    let server = create_test_server();

    let response = server
        .get("/api/search")
        .add_query_param("q", "Yoga")
        .add_query_param("limit", 5)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        ids(&body),
        vec!["gift-002", "gift-013", "gift-014", "gift-004", "gift-007"]
    );
    assert_eq!(scores(&body), vec![92, 46, 0, 0, 0]);
}

#[tokio::test]
async fn test_search_empty_query_sorted_by_rating() {
    let server = create_test_server();

    let response = server.get("/api/search").add_query_param("q", "  ").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), ResultLimits::default().search);

    let ratings: Vec<f64> = recommendations
        .iter()
        .map(|r| r["rating"].as_f64().unwrap())
        .collect();
    assert!(ratings.windows(2).all(|w| w[0] >= w[1]));

    for recommendation in recommendations {
        let rating = recommendation["rating"].as_f64().unwrap();
        let expected = (rating * 3.0).round() as u64;
        assert_eq!(recommendation["score"].as_u64().unwrap(), expected);
    }
}

#[tokio::test]
async fn test_search_rejects_negative_limit() {
    let server = create_test_server();

    let response = server
        .get("/api/search")
        .add_query_param("q", "tech")
        .add_query_param("limit", -1)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_budget_bucket() {
    let server = create_test_server();

    let response = server
        .get("/api/search")
        .add_query_param("q", "coffee")
        .add_query_param("budget", "100-plus")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(ids(&body), vec!["gift-007"]);
    assert_eq!(scores(&body), vec![0]);
}

#[tokio::test]
async fn test_search_localized() {
    let server = create_test_server();

    let response = server
        .get("/api/search")
        .add_query_param("q", "yoga")
        .add_query_param("locale", "ru")
        .add_query_param("limit", 1)
        .await;

    let body: Value = response.json();
    assert_eq!(
        body["recommendations"][0]["title"],
        "Премиальный коврик для йоги"
    );
    assert_eq!(body["recommendations"][0]["priceEstimate"], "$40 - $70");
}

#[tokio::test]
async fn test_list_and_get_gifts() {
    let server = create_test_server();

    let response = server.get("/api/gifts").await;
    response.assert_status_ok();
    let gifts: Vec<Value> = response.json();
    assert_eq!(gifts.len(), 15);

    let response = server.get("/api/gifts/gift-003").await;
    response.assert_status_ok();
    let gift: Value = response.json();
    assert_eq!(gift["title"], "Pour-Over Coffee Set");
}

#[tokio::test]
async fn test_get_inactive_or_unknown_gift_is_not_found() {
    let server = create_test_server();

    let response = server.get("/api/gifts/gift-016").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server.get("/api/gifts/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn test_missing_catalog_file_falls_back_to_demo() {
    let catalog = FallbackCatalog::new(
        Arc::new(JsonFileCatalog::new("/nonexistent/catalog.json")),
        Arc::new(StaticCatalog::sample().unwrap()),
    );
    let state = AppState::new(Arc::new(catalog), ResultLimits::default());
    let server = TestServer::new(create_router(state)).unwrap();

    let response = server
        .post("/api/quiz/submit")
        .json(&json!({ "answers": { "interests": "tech" } }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_missing_catalog_without_fallback_is_unavailable() {
    let state = AppState::new(
        Arc::new(JsonFileCatalog::new("/nonexistent/catalog.json")),
        ResultLimits::default(),
    );
    let server = TestServer::new(create_router(state)).unwrap();

    let response = server.get("/api/search").add_query_param("q", "tech").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}
