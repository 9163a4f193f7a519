//! Repository for the `workflow_steps` table.

use flowdef_core::types::Id;
use sqlx::PgPool;

use crate::models::workflow_step::{
    CreateWorkflowStep, UpdateWorkflowStep, WorkflowStep, WorkflowStepSummary,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, workflow_id, step_name, sequence, application_id, module_id, \
    page_id, section_id, role_ids, revision_id, created_by, created_at, updated_by, \
    updated_at, old_data, new_data, deleted_at";

/// Provides CRUD operations for workflow steps.
pub struct WorkflowStepRepo;

impl WorkflowStepRepo {
    /// Insert a new workflow step, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWorkflowStep,
    ) -> Result<WorkflowStep, sqlx::Error> {
        let query = format!(
            "INSERT INTO workflow_steps
                (workflow_id, step_name, sequence, application_id, module_id,
                 page_id, section_id, role_ids, created_by, new_data)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkflowStep>(&query)
            .bind(input.workflow_id)
            .bind(&input.step_name)
            .bind(input.sequence)
            .bind(input.application_id)
            .bind(input.module_id)
            .bind(input.page_id)
            .bind(input.section_id)
            .bind(&input.role_ids)
            .bind(input.actor_id)
            .bind(serde_json::to_value(input).ok())
            .fetch_one(pool)
            .await
    }

    /// True iff a step with this id exists and is not soft-deleted.
    ///
    /// Used as the precondition gate before an update and before a set
    /// step may reference this step.
    pub async fn exists(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM workflow_steps WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// True iff the step exists, is not soft-deleted, and belongs to the
    /// given workflow.
    ///
    /// This is the composite membership check behind the graph-integrity
    /// rule: every step a set step references must live in the set step's
    /// own workflow.
    pub async fn belongs_to_workflow(
        pool: &PgPool,
        step_id: Id,
        workflow_id: Id,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                 SELECT 1 FROM workflow_steps
                 WHERE id = $1 AND workflow_id = $2 AND deleted_at IS NULL)",
        )
        .bind(step_id)
        .bind(workflow_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Find a step by id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<WorkflowStep>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM workflow_steps WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, WorkflowStep>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a step by id, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: Id,
    ) -> Result<Option<WorkflowStep>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workflow_steps WHERE id = $1");
        sqlx::query_as::<_, WorkflowStep>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List non-deleted steps ordered by sequence, optionally filtered by
    /// owning workflow.
    pub async fn list(
        pool: &PgPool,
        workflow_id: Option<Id>,
    ) -> Result<Vec<WorkflowStep>, sqlx::Error> {
        if let Some(wf_id) = workflow_id {
            let query = format!(
                "SELECT {COLUMNS} FROM workflow_steps
                 WHERE workflow_id = $1 AND deleted_at IS NULL
                 ORDER BY sequence, created_at"
            );
            sqlx::query_as::<_, WorkflowStep>(&query)
                .bind(wf_id)
                .fetch_all(pool)
                .await
        } else {
            let query = format!(
                "SELECT {COLUMNS} FROM workflow_steps
                 WHERE deleted_at IS NULL
                 ORDER BY sequence, created_at"
            );
            sqlx::query_as::<_, WorkflowStep>(&query)
                .fetch_all(pool)
                .await
        }
    }

    /// Id + step name projection for picker lists.
    pub async fn list_summaries(
        pool: &PgPool,
        workflow_id: Option<Id>,
    ) -> Result<Vec<WorkflowStepSummary>, sqlx::Error> {
        if let Some(wf_id) = workflow_id {
            sqlx::query_as::<_, WorkflowStepSummary>(
                "SELECT id, step_name FROM workflow_steps
                 WHERE workflow_id = $1 AND deleted_at IS NULL
                 ORDER BY sequence, created_at",
            )
            .bind(wf_id)
            .fetch_all(pool)
            .await
        } else {
            sqlx::query_as::<_, WorkflowStepSummary>(
                "SELECT id, step_name FROM workflow_steps
                 WHERE deleted_at IS NULL
                 ORDER BY sequence, created_at",
            )
            .fetch_all(pool)
            .await
        }
    }

    /// Overwrite the mutable fields of a step.
    ///
    /// One conditional UPDATE with the same snapshot discipline as
    /// [`crate::repositories::WorkflowRepo::update`]. Returns `None` if
    /// the row is missing or soft-deleted.
    pub async fn update(
        pool: &PgPool,
        id: Id,
        input: &UpdateWorkflowStep,
    ) -> Result<Option<WorkflowStep>, sqlx::Error> {
        let query = format!(
            "UPDATE workflow_steps SET
                workflow_id = $2,
                step_name = $3,
                sequence = $4,
                application_id = $5,
                module_id = $6,
                page_id = $7,
                section_id = $8,
                role_ids = $9,
                old_data = to_jsonb(workflow_steps) - 'old_data' - 'new_data',
                new_data = $10,
                revision_id = gen_random_uuid(),
                updated_by = $11,
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkflowStep>(&query)
            .bind(id)
            .bind(input.workflow_id)
            .bind(&input.step_name)
            .bind(input.sequence)
            .bind(input.application_id)
            .bind(input.module_id)
            .bind(input.page_id)
            .bind(input.section_id)
            .bind(&input.role_ids)
            .bind(serde_json::to_value(input).ok())
            .bind(input.actor_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a step, stamping the acting user.
    ///
    /// Returns `true` if a row was marked deleted, `false` if it was
    /// missing or already deleted.
    pub async fn soft_delete(pool: &PgPool, id: Id, actor_id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE workflow_steps SET
                deleted_at = NOW(),
                old_data = to_jsonb(workflow_steps) - 'old_data' - 'new_data',
                revision_id = gen_random_uuid(),
                updated_by = $2,
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(actor_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
