//! Order routes: listing, placement, detail, quote, lifecycle.
//!
//! ## Placement Flow
//! ```text
//! POST /api/orders
//!   │
//!   ▼
//! load referenced products ──► any missing? 404
//!   │
//!   ▼
//! build draft (catalog rate snapshot, negotiated rate override)
//!   │
//!   ▼
//! validate_draft ──► violations? 400 listing every one
//!   │
//!   ▼
//! compute_price_details (pure)
//!   │
//!   ▼
//! OrderRepository::create ── one transaction, ORDnnn allocated inside
//!   │
//!   ▼
//! 200 { success, data: full order detail }
//! ```
//!
//! The quote endpoint shares the draft-building path but skips existence
//! checks and validation entirely: half-finished rows price to zero.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::dto::{
    OrderDetailDto, OrderPayload, OrderSummaryDto, PriceDetailsDto, StatusPayload,
};
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::response::ApiResponse;
use crate::state::AppState;
use rentdesk_core::pricing::compute_price_details;
use rentdesk_core::validation::validate_draft;
use rentdesk_core::{Order, Product};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list).post(create))
        .route("/orders/quote", post(quote))
        .route("/orders/{id}", get(get_one).patch(update_status))
}

/// Loads the products a payload references, keyed by id.
async fn load_products(
    state: &AppState,
    payload: &OrderPayload,
) -> Result<HashMap<String, Product>, ApiError> {
    let ids: Vec<String> = payload
        .items
        .iter()
        .map(|i| i.product_id.clone())
        .collect();
    let products = state.db.products().get_many(&ids).await?;
    Ok(products.into_iter().map(|p| (p.id.clone(), p)).collect())
}

/// Renders a full order detail, resolving customer and product names with
/// "Unknown" fallbacks.
async fn render_detail(state: &AppState, order: Order) -> Result<OrderDetailDto, ApiError> {
    let items = state.db.orders().get_items(&order.id).await?;

    let customer_name = state
        .db
        .customers()
        .get_by_id(&order.customer_id)
        .await?
        .map(|c| c.name);

    let ids: Vec<String> = items.iter().map(|i| i.product_id.clone()).collect();
    let products: HashMap<String, Product> = state
        .db
        .products()
        .get_many(&ids)
        .await?
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();

    Ok(OrderDetailDto::build(order, &items, customer_name, &products))
}

/// GET /api/orders
async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<OrderSummaryDto>>>, ApiError> {
    let rows = state.db.orders().list().await?;
    Ok(Json(ApiResponse::ok(
        rows.into_iter().map(OrderSummaryDto::from).collect(),
    )))
}

/// POST /api/orders
async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<OrderPayload>,
) -> Result<Json<ApiResponse<OrderDetailDto>>, ApiError> {
    // Placement is strict: the customer and every product must exist
    if state
        .db
        .customers()
        .get_by_id(&payload.customer_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound(format!(
            "Customer not found: {}",
            payload.customer_id
        )));
    }

    let products = load_products(&state, &payload).await?;
    for item in &payload.items {
        if !item.product_id.is_empty() && !products.contains_key(&item.product_id) {
            return Err(ApiError::NotFound(format!(
                "Product not found: {}",
                item.product_id
            )));
        }
    }

    let draft = payload.to_draft(&products);
    validate_draft(&draft).map_err(ApiError::validation)?;

    let details = compute_price_details(
        &draft.items,
        draft.discount.as_ref(),
        draft.delivery_charge,
        draft.initial_paid,
    );

    let order = state.db.orders().create(&draft, &details).await?;
    let detail = render_detail(&state, order).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// POST /api/orders/quote
///
/// Pricing preview for an in-progress draft. Never validates, never
/// persists: unknown products rate at zero, malformed numerics arrive
/// already coerced to zero.
async fn quote(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<OrderPayload>,
) -> Result<Json<ApiResponse<PriceDetailsDto>>, ApiError> {
    let products = load_products(&state, &payload).await?;
    let draft = payload.to_draft(&products);

    let details = compute_price_details(
        &draft.items,
        draft.discount.as_ref(),
        draft.delivery_charge,
        draft.initial_paid,
    );

    Ok(Json(ApiResponse::ok(details.into())))
}

/// GET /api/orders/{id}
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<OrderDetailDto>>, ApiError> {
    let order = state
        .db
        .orders()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order not found: {id}")))?;

    let detail = render_detail(&state, order).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// PATCH /api/orders/{id}
///
/// Status is the only mutable field after placement. Terminal states
/// reject every transition with a 409.
async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<StatusPayload>,
) -> Result<Json<ApiResponse<OrderDetailDto>>, ApiError> {
    let order = state.db.orders().update_status(&id, payload.status).await?;
    let detail = render_detail(&state, order).await?;
    Ok(Json(ApiResponse::ok(detail)))
}
