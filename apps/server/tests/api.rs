//! End-to-end API tests against an in-memory database.
//!
//! Each test builds the full router, drives it with `tower::ServiceExt::
//! oneshot`, and asserts on the JSON envelope.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use rentdesk_db::{Database, DbConfig};
use rentdesk_server::{api_router, AppState};

async fn app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    api_router(AppState::new(db), true)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

async fn create_customer(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/customers",
        Some(json!({"name": "Asha", "phone": "9876543210"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_product(app: &Router, name: &str, rate: f64) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/products",
        Some(json!({"name": name, "quantity": 10, "rate": rate, "rate_unit": "day"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], true);
}

#[tokio::test]
async fn test_product_crud() {
    let app = app().await;
    let id = create_product(&app, "Chef's Knife", 150.0).await;

    let (status, body) = send(&app, "GET", &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Chef's Knife");
    assert_eq!(body["data"]["rate"], 150.0);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/products/{id}"),
        Some(json!({"name": "Chef's Knife", "quantity": 5, "rate": 175.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["rate"], 175.0);
    assert_eq!(body["data"]["quantity"], 5);

    let (status, _) = send(&app, "DELETE", &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_put_validation() {
    let app = app().await;
    let id = create_product(&app, "Chef's Knife", 150.0).await;

    // Bad payload on an existing product: 400 wins
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/products/{id}"),
        Some(json!({"name": "", "quantity": -1, "rate": -5.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("name"));
    assert!(message.contains("quantity"));
    assert!(message.contains("rate"));

    // Bad payload on a missing product: still 400 (validation first)
    let (status, _) = send(
        &app,
        "PUT",
        "/api/products/no-such-id",
        Some(json!({"name": "", "quantity": -1, "rate": -5.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Good payload on a missing product: 404
    let (status, _) = send(
        &app,
        "PUT",
        "/api/products/no-such-id",
        Some(json!({"name": "Ok", "quantity": 1, "rate": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Unknown rate unit: 400
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/products/{id}"),
        Some(json!({"name": "Ok", "quantity": 1, "rate": 1.0, "rate_unit": "week"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_order_placement_prices_and_freezes() {
    let app = app().await;
    let customer = create_customer(&app).await;
    let knife = create_product(&app, "Chef's Knife", 150.0).await;
    let board = create_product(&app, "Cutting Board", 70.0).await;

    // 2 × ₹150 × 2 + 1 × ₹70 × 2 = ₹740; delivery ₹50 → total ₹790
    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_id": customer,
            "items": [
                {"product_id": knife, "quantity": 2, "number_of_days": 2},
                {"product_id": board, "quantity": 1, "number_of_days": 2}
            ],
            "delivery_address": "12 Market Road",
            "delivery_charge": 50.0,
            "payment_method": "Cash"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["id"], "ORD001");
    assert_eq!(data["price"], 740.0);
    assert_eq!(data["total"], 790.0);
    assert_eq!(data["remaining_amount"], 790.0);
    assert_eq!(data["status"], "Active");
    assert_eq!(data["payment_status"], "Unpaid");
    assert_eq!(data["customer_name"], "Asha");
    assert_eq!(data["items"][0]["product_name"], "Chef's Knife");
}

#[tokio::test]
async fn test_order_percentage_discount_and_partial_payment() {
    let app = app().await;
    let customer = create_customer(&app).await;
    let product = create_product(&app, "Stock Pot", 660.0).await;

    // ₹660 at 10% → ₹594 total; ₹500 paid → ₹94 remaining, Partial
    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_id": customer,
            "items": [{"product_id": product, "quantity": 1, "number_of_days": 1}],
            "delivery_address": "12 Market Road",
            "discount": {"type": "percentage", "value": 10.0},
            "payment_method": "UPI",
            "initial_paid": 500.0
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["price"], 660.0);
    assert_eq!(data["discount_amount"], 66.0);
    assert_eq!(data["total"], 594.0);
    assert_eq!(data["remaining_amount"], 94.0);
    assert_eq!(data["payment_status"], "Partial");
}

#[tokio::test]
async fn test_order_placement_validation() {
    let app = app().await;
    let customer = create_customer(&app).await;

    // No items, no address, no payment method
    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({"customer_id": customer})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("items"));
    assert!(message.contains("delivery_address"));
}

#[tokio::test]
async fn test_order_placement_unknown_product_404() {
    let app = app().await;
    let customer = create_customer(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_id": customer,
            "items": [{"product_id": "ghost", "quantity": 1, "number_of_days": 1}],
            "delivery_address": "addr",
            "payment_method": "Cash"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quote_is_fail_soft() {
    let app = app().await;

    // Garbage quantity, unknown product, missing fields: still 200, zeros
    let (status, body) = send(
        &app,
        "POST",
        "/api/orders/quote",
        Some(json!({
            "items": [{"product_id": "ghost", "quantity": "abc"}],
            "delivery_charge": "not-a-number"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], 0.0);
    assert_eq!(body["data"]["total"], 0.0);
}

#[tokio::test]
async fn test_quote_prices_a_real_draft() {
    let app = app().await;
    let product = create_product(&app, "Chef's Knife", 150.0).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/orders/quote",
        Some(json!({
            "items": [{"product_id": product, "quantity": 2, "number_of_days": 3}],
            "delivery_charge": 50.0
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], 900.0);
    assert_eq!(body["data"]["total"], 950.0);
}

#[tokio::test]
async fn test_status_lifecycle() {
    let app = app().await;
    let customer = create_customer(&app).await;
    let product = create_product(&app, "Chef's Knife", 150.0).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_id": customer,
            "items": [{"product_id": product, "quantity": 1, "number_of_days": 1}],
            "delivery_address": "addr",
            "payment_method": "Cash"
        })),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/orders/{id}"),
        Some(json!({"status": "Returned"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Returned");

    // Terminal: re-activation rejected
    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/orders/{id}"),
        Some(json!({"status": "Active"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_product_on_order_delete_conflicts() {
    let app = app().await;
    let customer = create_customer(&app).await;
    let product = create_product(&app, "Chef's Knife", 150.0).await;

    send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_id": customer,
            "items": [{"product_id": product, "quantity": 1, "number_of_days": 1}],
            "delivery_address": "addr",
            "payment_method": "Cash"
        })),
    )
    .await;

    let (status, _) = send(&app, "DELETE", &format!("/api/products/{product}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_deleted_customer_renders_unknown() {
    let app = app().await;
    let customer = create_customer(&app).await;
    let product = create_product(&app, "Chef's Knife", 150.0).await;

    send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_id": customer,
            "items": [{"product_id": product, "quantity": 1, "number_of_days": 1}],
            "delivery_address": "addr",
            "payment_method": "Cash"
        })),
    )
    .await;

    let (status, _) = send(&app, "DELETE", &format!("/api/customers/{customer}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/orders", None).await;
    assert_eq!(body["data"][0]["customer_name"], "Unknown customer");
}

#[tokio::test]
async fn test_report_summary() {
    let app = app().await;
    let customer = create_customer(&app).await;
    let knife = create_product(&app, "Chef's Knife", 150.0).await;
    let pot = create_product(&app, "Stock Pot", 350.0).await;

    // Order 1: 3 knives, 1 day → ₹450
    send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_id": customer,
            "items": [{"product_id": knife, "quantity": 3, "number_of_days": 1}],
            "delivery_address": "addr",
            "payment_method": "Cash"
        })),
    )
    .await;

    // Order 2: 2 knives + 1 pot, 1 day → ₹650, then cancelled
    let (_, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_id": customer,
            "items": [
                {"product_id": knife, "quantity": 2, "number_of_days": 1},
                {"product_id": pot, "quantity": 1, "number_of_days": 1}
            ],
            "delivery_address": "addr",
            "payment_method": "Cash"
        })),
    )
    .await;
    let second = body["data"]["id"].as_str().unwrap().to_string();
    send(
        &app,
        "PATCH",
        &format!("/api/orders/{second}"),
        Some(json!({"status": "Cancelled"})),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/reports/summary?window=today", None).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["order_count"], 2);
    // Cancelled order excluded from revenue
    assert_eq!(data["revenue"], 450.0);
    // Items from both orders count toward rental volume: knives 3+2=5
    assert_eq!(data["top_products"][0]["product_name"], "Chef's Knife");
    assert_eq!(data["top_products"][0]["quantity"], 5);

    let statuses: Vec<&str> = data["orders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["payment_status"].as_str().unwrap())
        .collect();
    assert!(statuses.contains(&"Unpaid"));
    assert!(statuses.contains(&"Cancelled"));
}

#[tokio::test]
async fn test_custom_window_requires_bounds() {
    let app = app().await;
    let (status, _) = send(&app, "GET", "/api/reports/summary?window=custom", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quote_with_absurd_magnitudes_still_answers() {
    // Quotes skip draft validation, so nothing upstream bounds these
    // numbers; pricing saturates instead of overflowing
    let app = app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/orders/quote",
        Some(json!({
            "customer_id": "",
            "items": [
                {"product_id": "", "quantity": 2, "rent_rate": 1.0e308, "number_of_days": 1}
            ],
            "delivery_address": "",
            "payment_method": ""
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["data"]["price"].as_f64().unwrap() > 0.0);
    assert_eq!(body["data"]["price"], body["data"]["total"]);
}

#[tokio::test]
async fn test_malformed_json_body_keeps_envelope() {
    let app = app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/orders/quote")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unparseable_query_param_keeps_envelope() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "GET",
        "/api/reports/summary?window=custom&from=not-a-date&to=2026-08-15",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_vehicles_list() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/vehicles", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}
