//! HTTP tests for `POST /stock-control/v1/stock` and `GET /health`.
//!
//! The router runs in-process over a mock catalog; no database is needed.

mod common;

use crate::common::{TestApp, ADMIN_TOKEN, MANAGER_TOKEN, READER_TOKEN};
use axum::http::StatusCode;
use serde_json::json;
use stock_control::domains::stock::models::StockStatus;
use stock_control::kernel::test_dependencies::MockCatalogStore;

// ============================================================================
// Batch scenarios
// ============================================================================

#[tokio::test]
async fn mixed_batch_reports_each_item_with_multi_status() {
    let app = TestApp::new();

    let response = app
        .post_json(
            Some(MANAGER_TOKEN),
            &json!([
                {"product_id": 42, "qty": 5},
                {"sku": "AA-1", "qty": "3"},
                {"qty": 7}
            ]),
        )
        .await;

    // A top-level array is not an object
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_codes(), vec!["invalid_payload"]);

    let response = app
        .post_json(
            Some(MANAGER_TOKEN),
            &json!({"items": [
                {"product_id": 42, "qty": 5},
                {"sku": "AA-1", "qty": "3"},
                {"qty": 7}
            ]}),
        )
        .await;

    assert_eq!(response.status, StatusCode::MULTI_STATUS);
    assert_eq!(response.body["success"], json!(false));

    let results = response.body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["index"], json!(0));
    assert_eq!(results[0]["resolved_product_id"], json!(42));
    assert_eq!(results[0]["old_stock"], json!(10));
    assert_eq!(results[0]["new_stock"], json!(5));
    assert_eq!(results[1]["index"], json!(1));
    assert_eq!(results[1]["resolved_product_id"], json!(50));
    assert_eq!(results[1]["new_stock"], json!(3));
    assert_eq!(results[1]["input"]["qty"], json!("3"));

    let errors = response.body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["index"], json!(2));
    assert_eq!(errors[0]["code"], json!("missing_identifier"));
    assert_eq!(errors[0]["identifier"], json!(null));

    // The unmanaged variation was switched to managed before the write
    let variation = app.deps.catalog.product(50).await.unwrap();
    assert!(variation.manage_stock);
    assert_eq!(variation.stock_quantity, Some(3));
    assert_eq!(variation.stock_status, StockStatus::InStock);
}

#[tokio::test]
async fn single_object_body_with_zero_qty_goes_out_of_stock() {
    let app = TestApp::new();

    let response = app
        .post_json(Some(MANAGER_TOKEN), &json!({"product_id": 1, "qty": 0}))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], json!(true));
    assert_eq!(response.body["errors"], json!([]));

    let results = response.body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["new_stock"], json!(0));
    assert_eq!(results[0]["status"], json!("updated"));
    assert_eq!(results[0]["mode"], json!("set"));

    let product = app.deps.catalog.product(1).await.unwrap();
    assert_eq!(product.stock_quantity, Some(0));
    assert_eq!(product.stock_status, StockStatus::OutOfStock);
}

#[tokio::test]
async fn rerunning_a_request_is_idempotent() {
    let app = TestApp::new();
    let body = json!({"items": [{"sku": "ONE", "qty": 4}]});

    let first = app.post_json(Some(MANAGER_TOKEN), &body).await;
    let second = app.post_json(Some(MANAGER_TOKEN), &body).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(first.body["results"][0]["old_stock"], json!(9));
    assert_eq!(
        second.body["results"][0]["old_stock"],
        first.body["results"][0]["new_stock"]
    );
    assert_eq!(second.body["results"][0]["new_stock"], json!(4));
}

#[tokio::test]
async fn fully_failed_batch_is_multi_status() {
    let app = TestApp::new();

    let response = app
        .post_json(
            Some(MANAGER_TOKEN),
            &json!({"items": [
                {"sku": "DUP", "qty": 1},
                {"sku": "PARENT", "qty": 1},
                {"sku": "NOPE", "qty": 1},
                {"sku": "ONE", "product_id": 1, "qty": 1},
                {"product_id": 1, "qty": -1}
            ]}),
        )
        .await;

    assert_eq!(response.status, StatusCode::MULTI_STATUS);
    assert_eq!(response.body["results"], json!([]));
    assert_eq!(
        response.error_codes(),
        vec![
            "ambiguous_sku",
            "variable_parent_sku_not_allowed",
            "sku_not_found",
            "ambiguous_identifier",
            "invalid_qty"
        ]
    );
    assert_eq!(app.deps.catalog.mutation_count(), 0);
}

#[tokio::test]
async fn payload_mode_applies_to_items_without_their_own() {
    let app = TestApp::new();

    let response = app
        .post_json(
            Some(MANAGER_TOKEN),
            &json!({"mode": "delta", "items": [
                {"product_id": 1, "qty": 1},
                {"product_id": 1, "qty": 2, "mode": "SET"}
            ]}),
        )
        .await;

    assert_eq!(response.status, StatusCode::MULTI_STATUS);
    assert_eq!(response.error_codes(), vec!["invalid_mode"]);
    assert_eq!(response.body["errors"][0]["index"], json!(0));
    assert_eq!(response.body["results"][0]["index"], json!(1));
}

// ============================================================================
// Request-level failures
// ============================================================================

#[tokio::test]
async fn empty_items_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .post_json(Some(MANAGER_TOKEN), &json!({"items": []}))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], json!(false));
    assert_eq!(response.error_codes(), vec!["empty_items"]);
    assert_eq!(response.body["errors"][0]["index"], json!(null));
    assert_eq!(response.body["errors"][0]["identifier"], json!(null));
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let app = TestApp::new();

    let not_json = app.post_raw(Some(MANAGER_TOKEN), "{not json").await;
    assert_eq!(not_json.status, StatusCode::BAD_REQUEST);
    assert_eq!(not_json.error_codes(), vec!["invalid_payload"]);

    let scalar = app.post_raw(Some(MANAGER_TOKEN), "42").await;
    assert_eq!(scalar.error_codes(), vec!["invalid_payload"]);

    let items_object = app
        .post_json(Some(MANAGER_TOKEN), &json!({"items": {"sku": "ONE"}}))
        .await;
    assert_eq!(items_object.status, StatusCode::BAD_REQUEST);
    assert_eq!(items_object.error_codes(), vec!["invalid_items"]);

    assert_eq!(app.deps.catalog.mutation_count(), 0);
}

#[tokio::test]
async fn unavailable_catalog_fails_the_whole_batch() {
    let app = TestApp::with_catalog(MockCatalogStore::new().unavailable());

    let response = app
        .post_json(Some(MANAGER_TOKEN), &json!({"product_id": 1, "qty": 1}))
        .await;

    assert_eq!(response.status, StatusCode::MULTI_STATUS);
    assert_eq!(response.error_codes(), vec!["woocommerce_not_available"]);
    assert_eq!(response.body["errors"][0]["index"], json!(null));
}

#[tokio::test]
async fn catalog_fault_is_isolated_to_its_item() {
    let app = TestApp::with_catalog(
        MockCatalogStore::with_products(common::sample_catalog()).failing_on(42),
    );

    let response = app
        .post_json(
            Some(MANAGER_TOKEN),
            &json!({"items": [{"product_id": 42, "qty": 1}, {"product_id": 1, "qty": 2}]}),
        )
        .await;

    assert_eq!(response.status, StatusCode::MULTI_STATUS);
    assert_eq!(response.error_codes(), vec!["internal_error"]);
    assert_eq!(
        response.body["errors"][0]["message"],
        json!("Unexpected error while processing this item.")
    );
    assert_eq!(response.body["results"][0]["index"], json!(1));
}

// ============================================================================
// Authorization
// ============================================================================

#[tokio::test]
async fn missing_api_key_is_unauthorized() {
    let app = TestApp::new();

    let response = app.post_json(None, &json!({"product_id": 1, "qty": 1})).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_codes(), vec!["unauthorized"]);
    assert!(app.deps.catalog.calls().is_empty());
}

#[tokio::test]
async fn unknown_api_key_is_unauthorized() {
    let app = TestApp::new();

    let response = app
        .post_json(Some("not-a-key"), &json!({"product_id": 1, "qty": 1}))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_codes(), vec!["unauthorized"]);
}

#[tokio::test]
async fn key_without_capability_is_forbidden() {
    let app = TestApp::new();

    let response = app
        .post_json(Some(READER_TOKEN), &json!({"product_id": 1, "qty": 1}))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_codes(), vec!["forbidden"]);
    assert_eq!(app.deps.catalog.mutation_count(), 0);
}

#[tokio::test]
async fn manage_options_key_is_accepted() {
    let app = TestApp::new();

    let response = app
        .post_json(Some(ADMIN_TOKEN), &json!({"product_id": 1, "qty": 1}))
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

// ============================================================================
// Logging
// ============================================================================

#[tokio::test]
async fn every_request_logs_a_summary() {
    let app = TestApp::new();

    app.post_json(
        Some(MANAGER_TOKEN),
        &json!({"items": [{"product_id": 1, "qty": 1}, {"qty": 1}]}),
    )
    .await;
    app.post_json(Some(MANAGER_TOKEN), &json!({"items": []}))
        .await;

    let summaries = app.deps.logger.contexts_for("Stock request summary");
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0]["method"], json!("POST"));
    assert_eq!(summaries[0]["route"], json!("/stock-control/v1/stock"));
    assert_eq!(summaries[0]["items"], json!(2));
    assert_eq!(summaries[0]["result_count"], json!(1));
    assert_eq!(summaries[0]["error_count"], json!(1));
    assert_eq!(summaries[0]["success"], json!(false));
    assert_eq!(summaries[0]["client"], json!("key_mana"));
    assert_eq!(summaries[1]["items"], json!(0));
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_reports_catalog_state() {
    let healthy = TestApp::new().get("/health").await;
    assert_eq!(healthy.status, StatusCode::OK);
    assert_eq!(healthy.body["status"], json!("healthy"));
    assert_eq!(healthy.body["catalog"]["status"], json!("ok"));

    let unhealthy = TestApp::with_catalog(MockCatalogStore::new().unavailable())
        .get("/health")
        .await;
    assert_eq!(unhealthy.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(unhealthy.body["status"], json!("unhealthy"));
}
