//! Route definitions for the read-only `/directory` reference data.

use axum::routing::get;
use axum::Router;

use crate::handlers::directory;
use crate::state::AppState;

/// Routes mounted at `/directory`.
///
/// ```text
/// GET /applications    -> applications
/// GET /modules         -> modules (?application_id)
/// GET /pages           -> pages (?module_id)
/// GET /sections        -> sections (?page_id)
/// GET /roles           -> roles
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/applications", get(directory::applications))
        .route("/modules", get(directory::modules))
        .route("/pages", get(directory::pages))
        .route("/sections", get(directory::sections))
        .route("/roles", get(directory::roles))
}
