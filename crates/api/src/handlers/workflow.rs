//! Handlers for the `/workflows` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use flowdef_core::error::CoreError;
use flowdef_core::types::Id;
use flowdef_db::models::workflow::{CreateWorkflow, UpdateWorkflow, Workflow, WorkflowSummary};
use flowdef_db::repositories::WorkflowRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::DeleteParams;
use crate::state::AppState;

/// Optional owning-application filter for list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub application_id: Option<Id>,
}

const NAME_TAKEN: &str = "Workflow name already exists. Please choose a different name.";

/// POST /api/v1/workflows
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateWorkflow>,
) -> AppResult<(StatusCode, Json<Workflow>)> {
    input.validate()?;

    if WorkflowRepo::is_name_taken(&state.pool, &input.name, None).await? {
        return Err(AppError::Core(CoreError::Conflict(NAME_TAKEN.into())));
    }

    let workflow = WorkflowRepo::create(&state.pool, &input).await?;
    tracing::info!(workflow_id = %workflow.id, name = %workflow.name, "Workflow created");
    Ok((StatusCode::CREATED, Json(workflow)))
}

/// GET /api/v1/workflows
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Workflow>>> {
    let workflows = WorkflowRepo::list(&state.pool, params.application_id).await?;
    Ok(Json(workflows))
}

/// GET /api/v1/workflows/summaries
pub async fn list_summaries(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<WorkflowSummary>>> {
    let summaries = WorkflowRepo::list_summaries(&state.pool, params.application_id).await?;
    Ok(Json(summaries))
}

/// GET /api/v1/workflows/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<Json<Workflow>> {
    let workflow = WorkflowRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workflow",
            id,
        }))?;
    Ok(Json(workflow))
}

/// PUT /api/v1/workflows/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<UpdateWorkflow>,
) -> AppResult<Json<Workflow>> {
    input.validate()?;

    if WorkflowRepo::is_name_taken(&state.pool, &input.name, Some(id)).await? {
        return Err(AppError::Core(CoreError::Conflict(NAME_TAKEN.into())));
    }

    let workflow = WorkflowRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workflow",
            id,
        }))?;
    tracing::info!(workflow_id = %workflow.id, "Workflow updated");
    Ok(Json(workflow))
}

/// DELETE /api/v1/workflows/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Query(params): Query<DeleteParams>,
) -> AppResult<StatusCode> {
    let deleted = WorkflowRepo::soft_delete(&state.pool, id, params.actor_id).await?;
    if deleted {
        tracing::info!(workflow_id = %id, actor_id = %params.actor_id, "Workflow deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Workflow",
            id,
        }))
    }
}
