//! Integration tests for folder operations.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_create_nested_folders_and_tree() {
    let app = TestApp::new();
    let projects = app.create_folder("Projects", None).await;
    let tower = app.create_folder("Tower", Some(projects.as_str())).await;

    let folder = app.get(&format!("/api/folders/{tower}")).await;
    assert_eq!(folder.status, StatusCode::OK);
    assert_eq!(folder.data()["path"], "/Projects/Tower");
    assert_eq!(folder.data()["parent_id"], projects.as_str());

    let tree = app.get("/api/folders/tree").await;
    assert_eq!(tree.status, StatusCode::OK);
    assert_eq!(tree.data()["total_folders"], 2);
    assert_eq!(tree.data()["roots"][0]["name"], "Projects");
    assert_eq!(tree.data()["roots"][0]["children"][0]["name"], "Tower");
}

#[tokio::test]
async fn test_duplicate_and_invalid_names() {
    let app = TestApp::new();
    app.create_folder("Contracts", None).await;

    let duplicate = app.post("/api/folders", json!({ "name": "Contracts" })).await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let slash = app.post("/api/folders", json!({ "name": "a/b" })).await;
    assert_eq!(slash.status, StatusCode::BAD_REQUEST);

    let blank = app.post("/api/folders", json!({ "name": "   " })).await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_requires_empty_folder() {
    let app = TestApp::new();
    let a = app.create_folder("A", None).await;
    let b = app.create_folder("B", Some(a.as_str())).await;

    let blocked = app.delete(&format!("/api/folders/{a}")).await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);
    assert_eq!(blocked.body["message"], "Cannot delete folder with subfolders");

    let doc = app
        .create_document(json!({ "file_name": "x.pdf", "file_size": 1, "folder_id": b }))
        .await;
    let with_docs = app.delete(&format!("/api/folders/{b}")).await;
    assert_eq!(with_docs.status, StatusCode::CONFLICT);
    assert_eq!(with_docs.body["message"], "Cannot delete folder with documents");

    let listed = app.get("/api/folders").await;
    let b_entry = listed
        .data()
        .as_array()
        .expect("array")
        .iter()
        .find(|f| f["id"] == b.as_str())
        .cloned()
        .expect("folder B listed");
    assert_eq!(b_entry["document_count"], 1);

    assert_eq!(app.delete(&format!("/api/documents/{doc}")).await.status, StatusCode::OK);
    assert_eq!(app.delete(&format!("/api/folders/{b}")).await.status, StatusCode::OK);
    assert_eq!(app.delete(&format!("/api/folders/{a}")).await.status, StatusCode::OK);

    let missing = app.delete(&format!("/api/folders/{a}")).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename_and_move_update_paths() {
    let app = TestApp::new();
    let a = app.create_folder("A", None).await;
    let b = app.create_folder("B", Some(a.as_str())).await;
    let c = app.create_folder("C", Some(b.as_str())).await;
    let other = app.create_folder("Other", None).await;

    let renamed = app
        .put(&format!("/api/folders/{a}"), json!({ "name": "Alpha" }))
        .await;
    assert_eq!(renamed.status, StatusCode::OK, "{}", renamed.body);
    assert_eq!(renamed.data()["path"], "/Alpha");
    let deep = app.get(&format!("/api/folders/{c}")).await;
    assert_eq!(deep.data()["path"], "/Alpha/B/C");

    let moved = app
        .put(&format!("/api/folders/{b}"), json!({ "parent_id": other }))
        .await;
    assert_eq!(moved.status, StatusCode::OK);
    let deep = app.get(&format!("/api/folders/{c}")).await;
    assert_eq!(deep.data()["path"], "/Other/B/C");

    let cycle = app
        .put(&format!("/api/folders/{b}"), json!({ "parent_id": c }))
        .await;
    assert_eq!(cycle.status, StatusCode::BAD_REQUEST);

    let to_root = app
        .put(&format!("/api/folders/{c}"), json!({ "parent_id": null }))
        .await;
    assert_eq!(to_root.status, StatusCode::OK);
    assert_eq!(to_root.data()["path"], "/C");
}
