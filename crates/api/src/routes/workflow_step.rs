//! Route definitions for the `/workflow-steps` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::workflow_step;
use crate::state::AppState;

/// Routes mounted at `/workflow-steps`.
///
/// ```text
/// GET    /             -> list
/// POST   /             -> create
/// GET    /summaries    -> list_summaries
/// GET    /{id}         -> get_by_id
/// PUT    /{id}         -> update
/// DELETE /{id}         -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(workflow_step::list).post(workflow_step::create))
        .route("/summaries", get(workflow_step::list_summaries))
        .route(
            "/{id}",
            get(workflow_step::get_by_id)
                .put(workflow_step::update)
                .delete(workflow_step::delete),
        )
}
