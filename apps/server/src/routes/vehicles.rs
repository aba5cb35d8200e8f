//! Delivery vehicle lookup route.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::dto::VehicleDto;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/vehicles", get(list))
}

/// GET /api/vehicles
async fn list(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<VehicleDto>>>, ApiError> {
    let vehicles = state.db.vehicles().list().await?;
    Ok(Json(ApiResponse::ok(vehicles)))
}
