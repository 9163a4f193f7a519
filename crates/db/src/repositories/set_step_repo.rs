//! Repository for the `set_steps` table.

use flowdef_core::types::Id;
use sqlx::PgPool;

use crate::models::set_step::{BranchCondition, CreateSetStep, SetStep, UpdateSetStep};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, workflow_id, step_id, is_conditional, next_step_yes, \
    next_step_no, revision_id, created_by, created_at, updated_by, updated_at, \
    old_data, new_data, deleted_at";

/// Normalize the no-path target for storage: only conditional edges carry
/// one, and a nil id counts as absent.
fn stored_next_step_no(is_conditional: BranchCondition, next_step_no: Option<Id>) -> Option<Id> {
    match is_conditional {
        BranchCondition::Yes => next_step_no.filter(|id| !id.is_nil()),
        BranchCondition::No => None,
    }
}

/// Provides CRUD operations for set steps (conditional edges).
pub struct SetStepRepo;

impl SetStepRepo {
    /// Insert a new set step, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSetStep) -> Result<SetStep, sqlx::Error> {
        let query = format!(
            "INSERT INTO set_steps
                (workflow_id, step_id, is_conditional, next_step_yes, next_step_no,
                 created_by, new_data)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SetStep>(&query)
            .bind(input.workflow_id)
            .bind(input.step_id)
            .bind(input.is_conditional)
            .bind(input.next_step_yes)
            .bind(stored_next_step_no(input.is_conditional, input.next_step_no))
            .bind(input.actor_id)
            .bind(serde_json::to_value(input).ok())
            .fetch_one(pool)
            .await
    }

    /// True iff a set step with this id exists and is not soft-deleted.
    pub async fn exists(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM set_steps WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Find a set step by id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<SetStep>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM set_steps WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, SetStep>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a set step by id, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: Id,
    ) -> Result<Option<SetStep>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM set_steps WHERE id = $1");
        sqlx::query_as::<_, SetStep>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List non-deleted set steps, optionally filtered by owning workflow.
    pub async fn list(pool: &PgPool, workflow_id: Option<Id>) -> Result<Vec<SetStep>, sqlx::Error> {
        if let Some(wf_id) = workflow_id {
            let query = format!(
                "SELECT {COLUMNS} FROM set_steps
                 WHERE workflow_id = $1 AND deleted_at IS NULL
                 ORDER BY created_at"
            );
            sqlx::query_as::<_, SetStep>(&query)
                .bind(wf_id)
                .fetch_all(pool)
                .await
        } else {
            let query = format!(
                "SELECT {COLUMNS} FROM set_steps WHERE deleted_at IS NULL ORDER BY created_at"
            );
            sqlx::query_as::<_, SetStep>(&query).fetch_all(pool).await
        }
    }

    /// Overwrite the mutable fields of a set step.
    ///
    /// One conditional UPDATE with the shared snapshot discipline.
    /// Returns `None` if the row is missing or soft-deleted.
    pub async fn update(
        pool: &PgPool,
        id: Id,
        input: &UpdateSetStep,
    ) -> Result<Option<SetStep>, sqlx::Error> {
        let query = format!(
            "UPDATE set_steps SET
                workflow_id = $2,
                step_id = $3,
                is_conditional = $4,
                next_step_yes = $5,
                next_step_no = $6,
                old_data = to_jsonb(set_steps) - 'old_data' - 'new_data',
                new_data = $7,
                revision_id = gen_random_uuid(),
                updated_by = $8,
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SetStep>(&query)
            .bind(id)
            .bind(input.workflow_id)
            .bind(input.step_id)
            .bind(input.is_conditional)
            .bind(input.next_step_yes)
            .bind(stored_next_step_no(input.is_conditional, input.next_step_no))
            .bind(serde_json::to_value(input).ok())
            .bind(input.actor_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a set step, stamping the acting user.
    ///
    /// Returns `true` if a row was marked deleted, `false` if it was
    /// missing or already deleted.
    pub async fn soft_delete(pool: &PgPool, id: Id, actor_id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE set_steps SET
                deleted_at = NOW(),
                old_data = to_jsonb(set_steps) - 'old_data' - 'new_data',
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
