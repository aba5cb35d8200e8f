//! # Application State
//!
//! Shared state handed to every HTTP handler. Cheap to clone: the database
//! handle wraps a pooled connection set.

use rentdesk_db::Database;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database handle providing repository access.
    pub db: Database,
}

impl AppState {
    /// Creates the application state around an open database.
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}
