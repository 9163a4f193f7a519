//! Handlers for the `/set-steps` resource.
//!
//! Set steps are the conditional edges of the definition graph, so on top
//! of the DTO rules these handlers enforce the cross-store invariant:
//! every step an edge references must belong to the edge's own workflow.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use flowdef_core::error::CoreError;
use flowdef_core::types::Id;
use flowdef_core::validate::{field_error, reference_failure};
use flowdef_db::models::set_step::{
    validate_create, validate_update, BranchCondition, CreateSetStep, SetStep, UpdateSetStep,
};
use flowdef_db::repositories::{SetStepRepo, WorkflowRepo, WorkflowStepRepo};
use serde::Deserialize;
use validator::ValidationErrors;

use crate::error::{AppError, AppResult};
use crate::handlers::DeleteParams;
use crate::state::AppState;

/// Optional owning-workflow filter for list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub workflow_id: Option<Id>,
}

/// Verify that every step referenced by the edge belongs to `workflow_id`.
///
/// Checks the source step, the yes-path target, and (on conditional edges)
/// the no-path target, accumulating one error per offending field so the
/// caller sees every bad reference at once.
async fn check_step_membership(
    state: &AppState,
    workflow_id: Id,
    step_id: Id,
    next_step_yes: Id,
    next_step_no: Option<Id>,
) -> AppResult<()> {
    if !WorkflowRepo::exists(&state.pool, workflow_id).await? {
        return Err(AppError::Validation(reference_failure(
            "workflow_id",
            "Workflow does not exist or has been deleted.",
        )));
    }

    let mut errors = ValidationErrors::new();

    if !WorkflowStepRepo::belongs_to_workflow(&state.pool, step_id, workflow_id).await? {
        errors.add(
            "step_id",
            field_error(
                "membership",
                "Step does not belong to the given workflow.",
            ),
        );
    }
    if !WorkflowStepRepo::belongs_to_workflow(&state.pool, next_step_yes, workflow_id).await? {
        errors.add(
            "next_step_yes",
            field_error(
                "membership",
                "Yes-path step does not belong to the given workflow.",
            ),
        );
    }
    if let Some(no_id) = next_step_no.filter(|id| !id.is_nil()) {
        if !WorkflowStepRepo::belongs_to_workflow(&state.pool, no_id, workflow_id).await? {
            errors.add(
                "next_step_no",
                field_error(
                    "membership",
                    "No-path step does not belong to the given workflow.",
                ),
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// POST /api/v1/set-steps
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSetStep>,
) -> AppResult<(StatusCode, Json<SetStep>)> {
    validate_create(&input)?;

    let next_no = match input.is_conditional {
        BranchCondition::Yes => input.next_step_no,
        BranchCondition::No => None,
    };
    check_step_membership(&state, input.workflow_id, input.step_id, input.next_step_yes, next_no)
        .await?;

    let set_step = SetStepRepo::create(&state.pool, &input).await?;
    tracing::info!(
        set_step_id = %set_step.id,
        workflow_id = %set_step.workflow_id,
        "Set step created"
    );
    Ok((StatusCode::CREATED, Json(set_step)))
}

/// GET /api/v1/set-steps
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<SetStep>>> {
    let set_steps = SetStepRepo::list(&state.pool, params.workflow_id).await?;
    Ok(Json(set_steps))
}

/// GET /api/v1/set-steps/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> AppResult<Json<SetStep>> {
    let set_step = SetStepRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SetStep",
            id,
        }))?;
    Ok(Json(set_step))
}

/// PUT /api/v1/set-steps/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(input): Json<UpdateSetStep>,
) -> AppResult<Json<SetStep>> {
    validate_update(&input)?;

    let next_no = match input.is_conditional {
        BranchCondition::Yes => input.next_step_no,
        BranchCondition::No => None,
    };
    check_step_membership(&state, input.workflow_id, input.step_id, input.next_step_yes, next_no)
        .await?;

    let set_step = SetStepRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SetStep",
            id,
        }))?;
    tracing::info!(set_step_id = %set_step.id, "Set step updated");
    Ok(Json(set_step))
}

/// DELETE /api/v1/set-steps/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Query(params): Query<DeleteParams>,
) -> AppResult<StatusCode> {
    let deleted = SetStepRepo::soft_delete(&state.pool, id, params.actor_id).await?;
    if deleted {
        tracing::info!(set_step_id = %id, actor_id = %params.actor_id, "Set step deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "SetStep",
            id,
        }))
    }
}
