//! Integration tests for the tag catalogue.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_create_and_list_tags() {
    let app = TestApp::new();
    app.create_tag("Structural").await;
    app.create_tag("Electrical").await;

    let tags = app.get("/api/tags").await;
    assert_eq!(tags.status, StatusCode::OK);
    let names: Vec<&str> = tags
        .data()
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Structural", "Electrical"]);
}

#[tokio::test]
async fn test_tag_names_are_unique_ignoring_case() {
    let app = TestApp::new();
    app.create_tag("Urgent").await;

    let duplicate = app
        .post("/api/tags", json!({ "name": "URGENT", "color": "#000000" }))
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_tag_color_must_be_hex() {
    let app = TestApp::new();

    let response = app
        .post("/api/tags", json!({ "name": "Red", "color": "red" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
