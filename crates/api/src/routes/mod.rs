pub mod directory;
pub mod health;
pub mod set_step;
pub mod workflow;
pub mod workflow_step;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /workflows                    list (?application_id), create
/// /workflows/summaries          id + name projection (?application_id)
/// /workflows/{id}               get, update, delete (?actor_id)
///
/// /workflow-steps               list (?workflow_id), create
/// /workflow-steps/summaries     id + step name projection (?workflow_id)
/// /workflow-steps/{id}          get, update, delete (?actor_id)
///
/// /set-steps                    list (?workflow_id), create
/// /set-steps/{id}               get, update, delete (?actor_id)
///
/// /directory/applications       upstream application list
/// /directory/modules            upstream module list (?application_id)
/// /directory/pages              upstream page list (?module_id)
/// /directory/sections           upstream section list (?page_id)
/// /directory/roles              upstream role list
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/workflows", workflow::router())
        .nest("/workflow-steps", workflow_step::router())
        .nest("/set-steps", set_step::router())
        .nest("/directory", directory::router())
}
