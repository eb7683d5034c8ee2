//! Integration tests for financial totals.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_totals_apply_ten_percent_tax() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/finance/totals",
            json!({
                "items": [
                    { "description": "Concrete", "quantity": 2, "unit_price": 100 },
                    { "description": "Delivery", "quantity": 1, "unit_price": 50 }
                ]
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    let formatted = &response.data()["formatted"];
    assert_eq!(formatted["subtotal"], "250.00");
    assert_eq!(formatted["tax"], "25.00");
    assert_eq!(formatted["total"], "275.00");
    assert_eq!(response.data()["tax_rate"], 0.1);
}

#[tokio::test]
async fn test_totals_of_no_items_are_zero() {
    let app = TestApp::new();

    let response = app.post("/api/finance/totals", json!({ "items": [] })).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["formatted"]["total"], "0.00");
}

#[tokio::test]
async fn test_negative_quantity_is_rejected() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/finance/totals",
            json!({ "items": [{ "quantity": -1, "unit_price": 10 }] }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
