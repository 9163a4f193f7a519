//! Handlers for the `/workflow-steps` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use flowdef_core::error::CoreError;
use flowdef_core::types::Id;
use flowdef_core::validate::reference_failure;
use flowdef_db::models::workflow_step::{
    CreateWorkflowStep, UpdateWorkflowStep, WorkflowStep, WorkflowStepSummary,
};
use flowdef_db::repositories::{WorkflowRepo, WorkflowStepRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::DeleteParams;
use crate::state::AppState;

/// Optional owning-workflow filter for list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub workflow_id: Option<Id>,
}

/// POST /api/v1/workflow-steps
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateWorkflowStep>,
) -> AppResult<(StatusCode, Json<WorkflowStep>)> {
    input.validate()?;

    // A step may only be created under an existing, live workflow root.
    if !WorkflowRepo::exists(&state.pool, input.workflow_id).await? {
        return Err(AppError::Validation(reference_failure(
            "workflow_id",
            "Workflow does not exist or has been deleted.",
        )));
    }

    let step = WorkflowStepRepo::create(&state.pool, &input).await?;
    tracing::info!(step_id = %step.id, workflow_id = %step.workflow_id, "Workflow step created");
    Ok((StatusCode::CREATED, Json(step)))
}

/// GET /api/v1/workflow-steps
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<WorkflowStep>>> {
    let steps = WorkflowStepRepo::list(&state.pool, params.workflow_id).await?;
    Ok(Json(steps))
}

/// GET /api/v1/workflow-steps/summaries
pub async fn list_summaries(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<WorkflowStepSummary>>> {
    let summaries = WorkflowStepRepo::list_summaries(&state.pool, params.workflow_id).await?;
    Ok(Json(summaries))
}

/// GET /api/v1/workflow-steps/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<Json<WorkflowStep>> {
    let step = WorkflowStepRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WorkflowStep",
            id,
        }))?;
    Ok(Json(step))
}

/// PUT /api/v1/workflow-steps/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<UpdateWorkflowStep>,
) -> AppResult<Json<WorkflowStep>> {
    input.validate()?;

    if !WorkflowRepo::exists(&state.pool, input.workflow_id).await? {
        return Err(AppError::Validation(reference_failure(
            "workflow_id",
            "Workflow does not exist or has been deleted.",
        )));
    }

    let step = WorkflowStepRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WorkflowStep",
            id,
        }))?;
    tracing::info!(step_id = %step.id, "Workflow step updated");
    Ok(Json(step))
}

/// DELETE /api/v1/workflow-steps/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Query(params): Query<DeleteParams>,
) -> AppResult<StatusCode> {
    let deleted = WorkflowStepRepo::soft_delete(&state.pool, id, params.actor_id).await?;
    if deleted {
        tracing::info!(step_id = %id, actor_id = %params.actor_id, "Workflow step deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "WorkflowStep",
            id,
        }))
    }
}
