//! Shared application state.

use database::postgres::DatabaseConnection;

/// Cloned into every router that needs it; the connection is a pooled handle.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: DatabaseConnection,
}
