//! Product catalog routes.
//!
//! PUT enforces the full taxonomy: 400 on validation failure, 404 on a
//! missing id. DELETE answers 409 when order items still reference the
//! product (the FK restricts it).

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::dto::{ProductDto, ProductPayload};
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::response::ApiResponse;
use crate::state::AppState;
use rentdesk_core::validation::{validate_name, validate_rate, validate_stock_quantity};
use rentdesk_core::{Money, RateUnit, ValidationError};
use rentdesk_db::repository::product::ProductInput;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route(
            "/products/{id}",
            get(get_one).put(update).delete(delete_one),
        )
}

fn validate(payload: &ProductPayload) -> Result<ProductInput, ApiError> {
    let mut errors = Vec::new();

    if let Err(e) = validate_name("name", &payload.name) {
        errors.push(e);
    }
    if let Err(e) = validate_stock_quantity(payload.quantity) {
        errors.push(e);
    }
    let rate = Money::from_rupees(payload.rate);
    if let Err(e) = validate_rate("rate", rate) {
        errors.push(e);
    }

    let rate_unit = match payload.rate_unit.as_deref() {
        None | Some("") => Some(RateUnit::default()),
        Some(s) => {
            let parsed = RateUnit::parse(s);
            if parsed.is_none() {
                errors.push(ValidationError::NotAllowed {
                    field: "rate_unit".to_string(),
                    allowed: vec![
                        "day".to_string(),
                        "hour".to_string(),
                        "month".to_string(),
                    ],
                });
            }
            parsed
        }
    };

    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    Ok(ProductInput {
        name: payload.name.trim().to_string(),
        quantity: payload.quantity,
        rate_paise: rate.paise(),
        rate_unit: rate_unit.unwrap_or_default(),
    })
}

/// GET /api/products
async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<ProductDto>>>, ApiError> {
    let products = state.db.products().list().await?;
    Ok(Json(ApiResponse::ok(
        products.into_iter().map(ProductDto::from).collect(),
    )))
}

/// POST /api/products
async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ProductPayload>,
) -> Result<Json<ApiResponse<ProductDto>>, ApiError> {
    let input = validate(&payload)?;
    let product = state.db.products().create(&input).await?;
    Ok(Json(ApiResponse::ok(product.into())))
}

/// GET /api/products/{id}
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProductDto>>, ApiError> {
    let product = state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product not found: {id}")))?;
    Ok(Json(ApiResponse::ok(product.into())))
}

/// PUT /api/products/{id}
///
/// Validation runs before the lookup, so a bad payload for a missing id
/// still answers 400.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<ProductPayload>,
) -> Result<Json<ApiResponse<ProductDto>>, ApiError> {
    let input = validate(&payload)?;
    let product = state.db.products().update(&id, &input).await?;
    Ok(Json(ApiResponse::ok(product.into())))
}

/// DELETE /api/products/{id}
///
/// 409 when the product appears on any order.
async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.db.products().delete(&id).await?;
    Ok(Json(ApiResponse::ok(())))
}
