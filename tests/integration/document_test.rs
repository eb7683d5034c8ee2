//! Integration tests for documents, versions, and tagging.

mod helpers;

use axum::http::StatusCode;
use serde_json::{Value, json};

use helpers::{TEST_MAX_UPLOAD, TestApp, USER};

fn active_versions(versions: &Value) -> Vec<String> {
    versions
        .as_array()
        .expect("versions should be an array")
        .iter()
        .filter(|v| v["is_active"] == json!(true))
        .map(|v| v["version"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_requests_without_user_are_rejected() {
    let app = TestApp::new();

    let missing = app.request("GET", "/api/documents", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["error"], "UNAUTHORIZED");

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.data()["status"], "ok");
    assert!(health.data().get("database").is_none());
}

#[tokio::test]
async fn test_create_document_starts_at_version_one() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/documents",
            json!({
                "file_name": "site-plan.pdf",
                "file_size": 2048,
                "category": "drawing",
                "change_log": "Initial issue"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let doc = response.data();
    assert_eq!(doc["file_name"], "site-plan.pdf");
    assert_eq!(doc["file_type"], "pdf");
    assert_eq!(doc["category"], "drawing");
    assert_eq!(doc["uploaded_by"], USER);
    assert_eq!(active_versions(&doc["versions"]), vec!["1.0"]);
    assert_eq!(doc["current_version"]["version"], "1.0");
    assert_eq!(doc["versions"][0]["change_log"], "Initial issue");
    assert!(doc["preview_url"].is_string());
}

#[tokio::test]
async fn test_version_uploads_promote_single_active_version() {
    let app = TestApp::new();
    let id = app
        .create_document(json!({ "file_name": "contract.pdf", "file_size": 100 }))
        .await;

    for (name, size) in [("contract-v2.pdf", 200), ("contract-v3.pdf", 300)] {
        let response = app
            .post(
                &format!("/api/documents/{id}/versions"),
                json!({ "file_name": name, "file_size": size, "change_log": "Revised" }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    }

    let versions = app.get(&format!("/api/documents/{id}/versions")).await;
    assert_eq!(versions.status, StatusCode::OK);
    let list = versions.data().as_array().expect("array");
    let numbers: Vec<&str> = list.iter().filter_map(|v| v["version"].as_str()).collect();
    assert_eq!(numbers, vec!["1.0", "1.1", "1.2"]);
    assert_eq!(active_versions(versions.data()), vec!["1.2"]);
    assert_eq!(list[0]["file_name"], "contract.pdf");
    assert_eq!(list[0]["file_size"], 100);

    let doc = app.get(&format!("/api/documents/{id}")).await;
    assert_eq!(doc.data()["file_name"], "contract-v3.pdf");
    assert_eq!(doc.data()["file_size"], 300);
    assert_eq!(doc.data()["current_version"]["version"], "1.2");

    let download = app.get(&format!("/api/documents/{id}/download")).await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(download.data()["version"], "1.2");
    assert_eq!(download.data()["file_name"], "contract-v3.pdf");
}

#[tokio::test]
async fn test_version_upload_errors() {
    let app = TestApp::new();

    let missing = app
        .post(
            "/api/documents/00000000-0000-0000-0000-000000000001/versions",
            json!({ "file_name": "a.pdf", "file_size": 1 }),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let id = app
        .create_document(json!({ "file_name": "a.pdf", "file_size": 1 }))
        .await;
    let too_big = app
        .post(
            &format!("/api/documents/{id}/versions"),
            json!({ "file_name": "a.pdf", "file_size": TEST_MAX_UPLOAD + 1 }),
        )
        .await;
    assert_eq!(too_big.status, StatusCode::BAD_REQUEST);
    assert_eq!(too_big.body["error"], "VALIDATION_ERROR");

    let versions = app.get(&format!("/api/documents/{id}/versions")).await;
    assert_eq!(versions.data().as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_list_filters_and_sorts() {
    let app = TestApp::new();
    app.create_document(json!({ "file_name": "beam.dwg", "file_size": 500, "category": "drawing" }))
        .await;
    app.create_document(json!({ "file_name": "Invoice-001.pdf", "file_size": 10, "category": "invoice" }))
        .await;
    app.create_document(json!({
        "file_name": "anchor.dwg",
        "file_size": 50,
        "category": "drawing",
        "description": "Foundation anchors"
    }))
    .await;

    let drawings = app
        .get("/api/documents?category=drawing&sort_by=name&sort_order=asc")
        .await;
    assert_eq!(drawings.status, StatusCode::OK);
    let names: Vec<&str> = drawings
        .data()
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|d| d["file_name"].as_str())
        .collect();
    assert_eq!(names, vec!["anchor.dwg", "beam.dwg"]);

    let by_size = app.get("/api/documents?sort_by=file_size&sort_order=desc").await;
    let sizes: Vec<i64> = by_size
        .data()
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|d| d["file_size"].as_i64())
        .collect();
    assert_eq!(sizes, vec![500, 50, 10]);

    let search = app.get("/api/documents?search=FOUNDATION").await;
    assert_eq!(search.data().as_array().map(Vec::len), Some(1));

    let bad = app.get("/api/documents?category=spaceship").await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete_document() {
    let app = TestApp::new();
    let id = app
        .create_document(json!({ "file_name": "report.docx", "file_size": 10, "description": "Draft" }))
        .await;

    let updated = app
        .put(
            &format!("/api/documents/{id}"),
            json!({ "status": "archived", "description": null }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK, "{}", updated.body);
    assert_eq!(updated.data()["status"], "archived");
    assert!(updated.data()["description"].is_null());
    assert_eq!(active_versions(&updated.data()["versions"]), vec!["1.0"]);

    let deleted = app.delete(&format!("/api/documents/{id}")).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app.get(&format!("/api/documents/{id}")).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_tagging_and_tag_filter() {
    let app = TestApp::new();
    let urgent = app.create_tag("Urgent").await;
    let site = app.create_tag("Site A").await;

    let id = app
        .create_document(json!({ "file_name": "permit.pdf", "file_size": 10, "tag_ids": [urgent] }))
        .await;
    app.create_document(json!({ "file_name": "other.pdf", "file_size": 10 }))
        .await;

    let added = app
        .post(
            &format!("/api/documents/{id}/tags"),
            json!({ "tag_ids": [site, urgent] }),
        )
        .await;
    assert_eq!(added.status, StatusCode::OK, "{}", added.body);
    let tag_names: Vec<&str> = added.data()["tags"]
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(tag_names, vec!["Urgent", "Site A"]);

    let filtered = app.get(&format!("/api/documents?tag_ids={site}")).await;
    assert_eq!(filtered.data().as_array().map(Vec::len), Some(1));

    let removed = app
        .delete(&format!("/api/documents/{id}/tags/{urgent}"))
        .await;
    assert_eq!(removed.status, StatusCode::OK);
    assert_eq!(removed.data()["tags"].as_array().map(Vec::len), Some(1));

    let unknown = app
        .post(
            &format!("/api/documents/{id}/tags"),
            json!({ "tag_ids": ["00000000-0000-0000-0000-000000000009"] }),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_document_in_unknown_folder_fails() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/documents",
            json!({
                "file_name": "a.pdf",
                "file_size": 1,
                "folder_id": "00000000-0000-0000-0000-000000000002"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
