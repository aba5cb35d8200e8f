//! Customer routes.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::dto::{CustomerDto, CustomerPayload};
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::response::ApiResponse;
use crate::state::AppState;
use rentdesk_core::validation::{validate_name, validate_phone};
use rentdesk_db::repository::customer::CustomerInput;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list).post(create))
        .route(
            "/customers/{id}",
            get(get_one).put(update).delete(delete_one),
        )
}

fn validate(payload: &CustomerPayload) -> Result<CustomerInput, ApiError> {
    let mut errors = Vec::new();
    if let Err(e) = validate_name("name", &payload.name) {
        errors.push(e);
    }
    if let Err(e) = validate_phone(&payload.phone) {
        errors.push(e);
    }
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    Ok(CustomerInput {
        name: payload.name.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        address: payload.address.clone(),
        aadhar: payload.aadhar.clone(),
        referred_by: payload.referred_by.clone(),
    })
}

/// GET /api/customers
async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<CustomerDto>>>, ApiError> {
    let customers = state.db.customers().list().await?;
    Ok(Json(ApiResponse::ok(customers)))
}

/// POST /api/customers
async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CustomerPayload>,
) -> Result<Json<ApiResponse<CustomerDto>>, ApiError> {
    let input = validate(&payload)?;
    let customer = state.db.customers().create(&input).await?;
    Ok(Json(ApiResponse::ok(customer)))
}

/// GET /api/customers/{id}
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CustomerDto>>, ApiError> {
    let customer = state
        .db
        .customers()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Customer not found: {id}")))?;
    Ok(Json(ApiResponse::ok(customer)))
}

/// PUT /api/customers/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<CustomerPayload>,
) -> Result<Json<ApiResponse<CustomerDto>>, ApiError> {
    let input = validate(&payload)?;
    let customer = state.db.customers().update(&id, &input).await?;
    Ok(Json(ApiResponse::ok(customer)))
}

/// DELETE /api/customers/{id}
///
/// Allowed even when the customer has orders; the order history keeps the
/// dangling id and listings render "Unknown customer".
async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.db.customers().delete(&id).await?;
    Ok(Json(ApiResponse::ok(())))
}
