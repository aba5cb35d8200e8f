//! # API Error Type
//!
//! The single error type HTTP handlers return. Implements `IntoResponse`
//! so handlers can use `?` all the way down.
//!
//! ## Status Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ApiError variant        HTTP status   Typical source                   │
//! │  ──────────────────      ───────────   ──────────────                   │
//! │  BadRequest              400           validation failures              │
//! │  NotFound                404           missing id on GET/PUT/DELETE     │
//! │  Conflict                409           terminal-status transition,      │
//! │                                        product referenced by orders,    │
//! │                                        duplicate vehicle number         │
//! │  Internal                500           pool/query/migration failures    │
//! │                                        (logged, message not leaked)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use crate::response::ApiResponse;
use rentdesk_core::ValidationError;
use rentdesk_db::DbError;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input failed validation.
    #[error("{0}")]
    BadRequest(String),

    /// Requested entity doesn't exist.
    #[error("{0}")]
    NotFound(String),

    /// Request conflicts with current state.
    #[error("{0}")]
    Conflict(String),

    /// Something broke on our side. The cause is logged; clients only ever
    /// see the generic message.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Builds a 400 from one or more validation errors.
    pub fn validation(errors: Vec<ValidationError>) -> Self {
        let message = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        ApiError::BadRequest(message)
    }
}

/// Maps database failures onto the HTTP taxonomy.
///
/// Persistence failures become opaque 500s; the real cause goes to the log,
/// never to the client.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::NotFound(err.to_string()),

            DbError::InvalidTransition { .. } => ApiError::Conflict(err.to_string()),

            DbError::UniqueViolation { .. } => ApiError::Conflict(err.to_string()),

            DbError::ForeignKeyViolation { .. } => ApiError::Conflict(
                "Operation blocked: the record is referenced by existing orders".to_string(),
            ),

            DbError::ConnectionFailed(_)
            | DbError::MigrationFailed(_)
            | DbError::QueryFailed(_)
            | DbError::PoolExhausted
            | DbError::Internal(_) => {
                error!(error = %err, "Database operation failed");
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            // The stored message stays in the log only
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(ApiResponse::err(message))).into_response()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
