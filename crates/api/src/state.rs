use std::sync::Arc;

use crate::config::ServerConfig;
use crate::directory::DirectoryClient;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: flowdef_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Read-only client for the upstream enterprise directory.
    pub directory: Arc<DirectoryClient>,
}
