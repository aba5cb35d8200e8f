//! Reporting route.
//!
//! GET /api/reports/summary?window=this_week&top=5
//! GET /api/reports/summary?window=custom&from=2026-08-01&to=2026-08-15
//!
//! All metrics are projections over stored order snapshots; nothing here
//! recomputes pricing.

use std::collections::HashMap;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::dto::{ReportOrderDto, ReportSummaryDto};
use crate::error::ApiError;
use crate::extract::ApiQuery;
use crate::response::ApiResponse;
use crate::state::AppState;
use rentdesk_core::report::{summarize, ReportWindow};
use rentdesk_core::Product;

const DEFAULT_TOP: usize = 5;

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    /// all | today | yesterday | this_week | this_month | this_year | custom
    pub window: Option<String>,
    /// Custom window start (YYYY-MM-DD, inclusive).
    pub from: Option<NaiveDate>,
    /// Custom window end (YYYY-MM-DD, inclusive).
    pub to: Option<NaiveDate>,
    /// How many top products to return.
    pub top: Option<usize>,
}

fn parse_window(params: &SummaryParams) -> Result<ReportWindow, ApiError> {
    match params.window.as_deref() {
        None | Some("all") => Ok(ReportWindow::All),
        Some("today") => Ok(ReportWindow::Today),
        Some("yesterday") => Ok(ReportWindow::Yesterday),
        Some("this_week") => Ok(ReportWindow::ThisWeek),
        Some("this_month") => Ok(ReportWindow::ThisMonth),
        Some("this_year") => Ok(ReportWindow::ThisYear),
        Some("custom") => match (params.from, params.to) {
            (Some(from), Some(to)) => Ok(ReportWindow::Custom { from, to }),
            _ => Err(ApiError::BadRequest(
                "window=custom requires from and to dates".to_string(),
            )),
        },
        Some(other) => Err(ApiError::BadRequest(format!(
            "Unknown report window: {other}"
        ))),
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/reports/summary", get(summary))
}

/// GET /api/reports/summary
async fn summary(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SummaryParams>,
) -> Result<Json<ApiResponse<ReportSummaryDto>>, ApiError> {
    let window = parse_window(&params)?;
    let top = params.top.unwrap_or(DEFAULT_TOP);
    let now = Utc::now();

    let all = state.db.orders().list_with_items().await?;
    let in_window: Vec<_> = all
        .into_iter()
        .filter(|o| window.contains(now, o.order.created_at))
        .collect();

    let order_dtos: Vec<ReportOrderDto> =
        in_window.iter().map(|o| ReportOrderDto::from(&o.order)).collect();
    let aggregate = summarize(&in_window, top);

    // Product names for the top-products list; deleted products fall back
    // to the unknown placeholder
    let products: HashMap<String, Product> = state
        .db
        .products()
        .list()
        .await?
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();

    Ok(Json(ApiResponse::ok(ReportSummaryDto::build(
        aggregate, order_dtos, &products,
    ))))
}
