//! Workflow root entity and DTOs.

use flowdef_core::types::Id;
use flowdef_core::workflow::NAME_RE;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::audit::AuditTrail;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a workflow definition.
///
/// Stored as the Postgres `workflow_status` enum and serialized as
/// `"Active"` / `"Inactive"`. A closed set: anything else is rejected at
/// the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "workflow_status")]
pub enum WorkflowStatus {
    Active,
    Inactive,
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A workflow definition row from the `workflows` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workflow {
    pub id: Id,
    pub name: String,
    pub description: Option<String>,
    pub status: WorkflowStatus,
    pub application_id: Id,
    pub module_id: Id,
    pub starting_page_id: Id,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditTrail,
}

/// Id + name projection for picker lists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkflowSummary {
    pub id: Id,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a workflow.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateWorkflow {
    #[validate(
        length(min = 3, max = 50, message = "Name must be between 3 and 50 characters."),
        regex(
            path = *NAME_RE,
            message = "Name can only contain letters and single spaces between words."
        )
    )]
    pub name: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters."))]
    pub description: Option<String>,
    pub status: WorkflowStatus,
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid application id."
    ))]
    pub application_id: Id,
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid module id."
    ))]
    pub module_id: Id,
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid starting page id."
    ))]
    pub starting_page_id: Id,
    /// Actor recorded as `created_by`.
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid actor id."
    ))]
    pub actor_id: Id,
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Input for updating a workflow. All mutable fields are overwritten.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateWorkflow {
    #[validate(
        length(min = 3, max = 50, message = "Name must be between 3 and 50 characters."),
        regex(
            path = *NAME_RE,
            message = "Name can only contain letters and single spaces between words."
        )
    )]
    pub name: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters."))]
    pub description: Option<String>,
    pub status: WorkflowStatus,
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid application id."
    ))]
    pub application_id: Id,
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid module id."
    ))]
    pub module_id: Id,
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid starting page id."
    ))]
    pub starting_page_id: Id,
    /// Actor recorded as `updated_by`.
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid actor id."
    ))]
    pub actor_id: Id,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn valid_create() -> CreateWorkflow {
        CreateWorkflow {
            name: "Onboarding Flow".to_string(),
            description: Some("New-hire onboarding".to_string()),
            status: WorkflowStatus::Active,
            application_id: Uuid::new_v4(),
            module_id: Uuid::new_v4(),
            starting_page_id: Uuid::new_v4(),
            actor_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn accepts_valid_input() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn rejects_short_name() {
        let mut input = valid_create();
        input.name = "Ab".to_string();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn rejects_name_with_digits() {
        let mut input = valid_create();
        input.name = "Flow 2".to_string();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn rejects_overlong_description() {
        let mut input = valid_create();
        input.description = Some("x".repeat(501));
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn rejects_nil_reference_ids() {
        let mut input = valid_create();
        input.module_id = Uuid::nil();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("module_id"));
    }

    #[test]
    fn status_is_a_closed_set() {
        let err = serde_json::from_str::<WorkflowStatus>("\"Archived\"");
        assert!(err.is_err());
        let ok: WorkflowStatus = serde_json::from_str("\"Inactive\"").unwrap();
        assert_eq!(ok, WorkflowStatus::Inactive);
    }
}
