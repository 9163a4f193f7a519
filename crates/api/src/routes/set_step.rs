//! Route definitions for the `/set-steps` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::set_step;
use crate::state::AppState;

/// Routes mounted at `/set-steps`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(set_step::list).post(set_step::create))
        .route(
            "/{id}",
            get(set_step::get_by_id)
                .put(set_step::update)
                .delete(set_step::delete),
        )
}
