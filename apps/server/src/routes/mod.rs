//! # HTTP Routes
//!
//! Route table for the JSON API. Handlers stay thin: deserialize, validate,
//! call a repository, wrap the result in the response envelope.
//!
//! ## Route Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    /api/health                    liveness + database check        │
//! │                                                                         │
//! │  GET    /api/customers                 list customers                   │
//! │  POST   /api/customers                 create customer                  │
//! │  GET    /api/customers/{id}            fetch one                        │
//! │  PUT    /api/customers/{id}            update                           │
//! │  DELETE /api/customers/{id}            delete (orders survive)          │
//! │                                                                         │
//! │  GET    /api/products                  list catalog                     │
//! │  POST   /api/products                  create entry                     │
//! │  GET    /api/products/{id}             fetch one                        │
//! │  PUT    /api/products/{id}             update (400/404 taxonomy)        │
//! │  DELETE /api/products/{id}             delete (409 when on orders)      │
//! │                                                                         │
//! │  GET    /api/orders                    list with customer names         │
//! │  POST   /api/orders                    place order (transactional)      │
//! │  POST   /api/orders/quote              price preview, fail-soft         │
//! │  GET    /api/orders/{id}               detail with items                │
//! │  PATCH  /api/orders/{id}               status update (lifecycle)        │
//! │                                                                         │
//! │  GET    /api/vehicles                  delivery vehicle lookup          │
//! │  GET    /api/reports/summary           windowed metrics                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod customers;
pub mod health;
pub mod orders;
pub mod products;
pub mod reports;
pub mod vehicles;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn api_router(state: AppState, permissive_cors: bool) -> Router {
    let api = Router::new()
        .merge(health::router())
        .merge(customers::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(vehicles::router())
        .merge(reports::router());

    let cors = if permissive_cors {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
