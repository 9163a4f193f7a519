//! Workflow step entity and DTOs.

use flowdef_core::step::STEP_NAME_RE;
use flowdef_core::types::Id;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::audit::AuditTrail;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A workflow step row from the `workflow_steps` table.
///
/// `sequence` is a display/ordering hint only; duplicates within a
/// workflow are permitted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkflowStep {
    pub id: Id,
    pub workflow_id: Id,
    pub step_name: String,
    pub sequence: i32,
    pub application_id: Id,
    pub module_id: Id,
    pub page_id: Id,
    pub section_id: Id,
    pub role_ids: Vec<Id>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditTrail,
}

/// Id + step name projection for picker lists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkflowStepSummary {
    pub id: Id,
    pub step_name: String,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a workflow step.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateWorkflowStep {
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid workflow id."
    ))]
    pub workflow_id: Id,
    #[validate(regex(
        path = *STEP_NAME_RE,
        message = "Step name must follow pattern: step1, step2, step3..."
    ))]
    pub step_name: String,
    #[validate(range(min = 1, max = 99, message = "Sequence must be between 1 and 99."))]
    pub sequence: i32,
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
        message = "Invalid page id."
    ))]
    pub page_id: Id,
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid section id."
    ))]
    pub section_id: Id,
    #[validate(
        length(min = 1, message = "At least one role is required."),
        custom(
            function = flowdef_core::validate::no_nil_entries,
            message = "Role ids must not contain the nil id."
        )
    )]
    pub role_ids: Vec<Id>,
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

/// Input for updating a workflow step. All mutable fields are overwritten.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateWorkflowStep {
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid workflow id."
    ))]
    pub workflow_id: Id,
    #[validate(regex(
        path = *STEP_NAME_RE,
        message = "Step name must follow pattern: step1, step2, step3..."
    ))]
    pub step_name: String,
    #[validate(range(min = 1, max = 99, message = "Sequence must be between 1 and 99."))]
    pub sequence: i32,
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
        message = "Invalid page id."
    ))]
    pub page_id: Id,
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid section id."
    ))]
    pub section_id: Id,
    #[validate(
        length(min = 1, message = "At least one role is required."),
        custom(
            function = flowdef_core::validate::no_nil_entries,
            message = "Role ids must not contain the nil id."
        )
    )]
    pub role_ids: Vec<Id>,
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

    fn valid_create() -> CreateWorkflowStep {
        CreateWorkflowStep {
            workflow_id: Uuid::new_v4(),
            step_name: "step1".to_string(),
            sequence: 1,
            application_id: Uuid::new_v4(),
            module_id: Uuid::new_v4(),
            page_id: Uuid::new_v4(),
            section_id: Uuid::new_v4(),
            role_ids: vec![Uuid::new_v4()],
            actor_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn accepts_valid_input() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn rejects_sequence_out_of_bounds() {
        let mut input = valid_create();
        input.sequence = 0;
        assert!(input.validate().unwrap_err().field_errors().contains_key("sequence"));

        input.sequence = 100;
        assert!(input.validate().unwrap_err().field_errors().contains_key("sequence"));
    }

    #[test]
    fn rejects_step_name_off_pattern() {
        let mut input = valid_create();
        input.step_name = "first step".to_string();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("step_name"));
    }

    #[test]
    fn rejects_empty_role_set() {
        let mut input = valid_create();
        input.role_ids = vec![];
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role_ids"));
    }

    #[test]
    fn rejects_nil_role_entry() {
        let mut input = valid_create();
        input.role_ids = vec![Uuid::new_v4(), Uuid::nil()];
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role_ids"));
    }

    #[test]
    fn rejects_nil_section_id() {
        let mut input = valid_create();
        input.section_id = Uuid::nil();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("section_id"));
    }
}
