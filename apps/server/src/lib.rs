//! # rentdesk-server: HTTP API for RentalDesk
//!
//! Thin axum layer over [`rentdesk_core`] and [`rentdesk_db`].
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Request Lifecycle                                │
//! │                                                                         │
//! │  HTTP request                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TraceLayer / CorsLayer (tower-http)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  routes::* handler                                                     │
//! │       ├── dto: lenient deserialization, rupees → paise                 │
//! │       ├── rentdesk-core: validation + pricing (pure)                   │
//! │       ├── rentdesk-db: repositories (SQLite)                           │
//! │       └── dto: paise → rupees, name fallbacks                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiResponse envelope { success, data?, error? }                       │
//! │  (ApiError → 400/404/409/500 on the failure path)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod response;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use response::ApiResponse;
pub use routes::api_router;
pub use state::AppState;
