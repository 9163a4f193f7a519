//! Repository for the `workflows` table.

use flowdef_core::types::Id;
use sqlx::PgPool;

use crate::models::workflow::{CreateWorkflow, UpdateWorkflow, Workflow, WorkflowSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, status, application_id, module_id, \
    starting_page_id, revision_id, created_by, created_at, updated_by, updated_at, \
    old_data, new_data, deleted_at";

/// Provides CRUD operations for workflow definitions.
pub struct WorkflowRepo;

impl WorkflowRepo {
    /// Case-insensitive name collision check among non-deleted rows.
    ///
    /// On the update path, `exclude_id` exempts the row being updated from
    /// the check. The `uq_workflows_name_lower` partial unique index backs
    /// this up, so a lost check-then-insert race still surfaces as a
    /// constraint conflict rather than a duplicate row.
    pub async fn is_name_taken(
        pool: &PgPool,
        name: &str,
        exclude_id: Option<Id>,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                 SELECT 1 FROM workflows
                 WHERE LOWER(name) = LOWER($1)
                   AND deleted_at IS NULL
                   AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Insert a new workflow, returning the created row.
    ///
    /// The incoming state is snapshotted into `new_data`; `updated_by` and
    /// `updated_at` stay NULL until the first update.
    pub async fn create(pool: &PgPool, input: &CreateWorkflow) -> Result<Workflow, sqlx::Error> {
        let query = format!(
            "INSERT INTO workflows
                (name, description, status, application_id, module_id, starting_page_id,
                 created_by, new_data)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workflow>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.application_id)
            .bind(input.module_id)
            .bind(input.starting_page_id)
            .bind(input.actor_id)
            .bind(serde_json::to_value(input).ok())
            .fetch_one(pool)
            .await
    }

    /// True iff a row with this id exists and is not soft-deleted.
    pub async fn exists(pool: &PgPool, id: Id) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM workflows WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Find a workflow by id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: Id) -> Result<Option<Workflow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workflows WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Workflow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a workflow by id, including soft-deleted rows.
    ///
    /// The audit trail survives deletion; this is the raw read for it.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: Id,
    ) -> Result<Option<Workflow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workflows WHERE id = $1");
        sqlx::query_as::<_, Workflow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List non-deleted workflows ordered by name, optionally filtered by
    /// owning application.
    pub async fn list(
        pool: &PgPool,
        application_id: Option<Id>,
    ) -> Result<Vec<Workflow>, sqlx::Error> {
        if let Some(app_id) = application_id {
            let query = format!(
                "SELECT {COLUMNS} FROM workflows
                 WHERE application_id = $1 AND deleted_at IS NULL
                 ORDER BY name"
            );
            sqlx::query_as::<_, Workflow>(&query)
                .bind(app_id)
                .fetch_all(pool)
                .await
        } else {
            let query =
                format!("SELECT {COLUMNS} FROM workflows WHERE deleted_at IS NULL ORDER BY name");
            sqlx::query_as::<_, Workflow>(&query).fetch_all(pool).await
        }
    }

    /// Id + name projection of [`Self::list`] for picker lists.
    pub async fn list_summaries(
        pool: &PgPool,
        application_id: Option<Id>,
    ) -> Result<Vec<WorkflowSummary>, sqlx::Error> {
        if let Some(app_id) = application_id {
            sqlx::query_as::<_, WorkflowSummary>(
                "SELECT id, name FROM workflows
                 WHERE application_id = $1 AND deleted_at IS NULL
                 ORDER BY name",
            )
            .bind(app_id)
            .fetch_all(pool)
            .await
        } else {
            sqlx::query_as::<_, WorkflowSummary>(
                "SELECT id, name FROM workflows WHERE deleted_at IS NULL ORDER BY name",
            )
            .fetch_all(pool)
            .await
        }
    }

    /// Overwrite the mutable fields of a workflow.
    ///
    /// Runs as one conditional UPDATE: the prior row is snapshotted into
    /// `old_data`, the incoming state into `new_data`, and `revision_id`
    /// is regenerated. Returns `None` if the row is missing or
    /// soft-deleted, so there is no gap between the existence check and
    /// the write.
    pub async fn update(
        pool: &PgPool,
        id: Id,
        input: &UpdateWorkflow,
    ) -> Result<Option<Workflow>, sqlx::Error> {
        let query = format!(
            "UPDATE workflows SET
                name = $2,
                description = $3,
                status = $4,
                application_id = $5,
                module_id = $6,
                starting_page_id = $7,
                old_data = to_jsonb(workflows) - 'old_data' - 'new_data',
                new_data = $8,
                revision_id = gen_random_uuid(),
                updated_by = $9,
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workflow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.application_id)
            .bind(input.module_id)
            .bind(input.starting_page_id)
            .bind(serde_json::to_value(input).ok())
            .bind(input.actor_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a workflow, stamping the acting user.
    ///
    /// Returns `true` if a row was marked deleted, `false` if it was
    /// missing or already deleted.
    pub async fn soft_delete(pool: &PgPool, id: Id, actor_id: Id) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE workflows SET
                deleted_at = NOW(),
                old_data = to_jsonb(workflows) - 'old_data' - 'new_data',
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
