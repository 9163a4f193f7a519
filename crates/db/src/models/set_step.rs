//! Conditional edge (set step) entity and DTOs.
//!
//! A set step wires one workflow step to its successor(s). Each source
//! step carries at most one outgoing edge; any number of edges may point
//! at a step. The no-path target only exists on conditional edges, which
//! is the one record-level invariant this module owns.

use flowdef_core::types::Id;
use flowdef_core::validate::field_error;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

use crate::models::audit::AuditTrail;

// ---------------------------------------------------------------------------
// Condition flag
// ---------------------------------------------------------------------------

/// Whether the edge branches on a yes/no outcome.
///
/// Stored as the Postgres `branch_condition` enum and serialized as
/// `"Yes"` / `"No"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "branch_condition")]
pub enum BranchCondition {
    Yes,
    No,
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A conditional edge row from the `set_steps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SetStep {
    pub id: Id,
    pub workflow_id: Id,
    /// Source step of the edge.
    pub step_id: Id,
    pub is_conditional: BranchCondition,
    /// Successor taken on the yes outcome; always present.
    pub next_step_yes: Id,
    /// Successor taken on the no outcome; only present on conditional edges.
    pub next_step_no: Option<Id>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditTrail,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Input for creating a set step.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSetStep {
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid workflow id."
    ))]
    pub workflow_id: Id,
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid step id."
    ))]
    pub step_id: Id,
    pub is_conditional: BranchCondition,
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "next_step_yes is required."
    ))]
    pub next_step_yes: Id,
    pub next_step_no: Option<Id>,
    /// Actor recorded as `created_by`.
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid actor id."
    ))]
    pub actor_id: Id,
}

/// Input for updating a set step. All mutable fields are overwritten.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSetStep {
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid workflow id."
    ))]
    pub workflow_id: Id,
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid step id."
    ))]
    pub step_id: Id,
    pub is_conditional: BranchCondition,
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "next_step_yes is required."
    ))]
    pub next_step_yes: Id,
    pub next_step_no: Option<Id>,
    /// Actor recorded as `updated_by`.
    #[validate(custom(
        function = flowdef_core::validate::non_nil,
        message = "Invalid actor id."
    ))]
    pub actor_id: Id,
}

// ---------------------------------------------------------------------------
// Branch-consistency rule
// ---------------------------------------------------------------------------

/// Enforce the no-path rule on top of the derive output: a conditional
/// edge requires a non-nil `next_step_no`, an unconditional one forbids it.
fn branch_rule(
    is_conditional: BranchCondition,
    next_step_no: Option<Id>,
    errors: &mut ValidationErrors,
) {
    match is_conditional {
        BranchCondition::Yes => match next_step_no {
            None => errors.add(
                "next_step_no",
                field_error(
                    "required_when_conditional",
                    "next_step_no is required when is_conditional is 'Yes'.",
                ),
            ),
            Some(id) if id.is_nil() => errors.add(
                "next_step_no",
                field_error("non_nil", "next_step_no must not be the nil id."),
            ),
            Some(_) => {}
        },
        BranchCondition::No => {
            if next_step_no.is_some_and(|id| !id.is_nil()) {
                errors.add(
                    "next_step_no",
                    field_error(
                        "forbidden_when_unconditional",
                        "next_step_no is not allowed when is_conditional is 'No'.",
                    ),
                );
            }
        }
    }
}

/// Run the derive rules plus the branch-consistency rule for a create.
pub fn validate_create(input: &CreateSetStep) -> Result<(), ValidationErrors> {
    let mut errors = input.validate().err().unwrap_or_else(ValidationErrors::new);
    branch_rule(input.is_conditional, input.next_step_no, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Run the derive rules plus the branch-consistency rule for an update.
pub fn validate_update(input: &UpdateSetStep) -> Result<(), ValidationErrors> {
    let mut errors = input.validate().err().unwrap_or_else(ValidationErrors::new);
    branch_rule(input.is_conditional, input.next_step_no, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
