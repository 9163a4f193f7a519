//! Custom field validators shared by the create/update DTOs.
//!
//! Reference ids are opaque foreign keys into the enterprise directory;
//! the only check the stores perform is that they are not the nil UUID.

use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

/// Reject the nil UUID for required reference ids.
pub fn non_nil(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::new("non_nil"));
    }
    Ok(())
}

/// Reject role collections that contain the nil UUID.
pub fn no_nil_entries(ids: &[Uuid]) -> Result<(), ValidationError> {
    if ids.iter().any(Uuid::is_nil) {
        return Err(ValidationError::new("no_nil_entries"));
    }
    Ok(())
}

/// Build a single-field validation failure.
///
/// Used for referential checks that run against storage (e.g. "this step
/// does not belong to that workflow") and therefore cannot be expressed as
/// derive rules on the DTO.
pub fn reference_failure(field: &'static str, message: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, field_error("reference", message));
    errors
}

/// A [`ValidationError`] with an explicit human-readable message.
pub fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_nil_rejects_nil_uuid() {
        assert!(non_nil(&Uuid::nil()).is_err());
        assert!(non_nil(&Uuid::new_v4()).is_ok());
    }

    #[test]
    fn no_nil_entries_rejects_nil_in_collection() {
        assert!(no_nil_entries(&[Uuid::new_v4(), Uuid::nil()]).is_err());
        assert!(no_nil_entries(&[Uuid::new_v4()]).is_ok());
        assert!(no_nil_entries(&[]).is_ok());
    }

    #[test]
    fn reference_failure_targets_the_named_field() {
        let errors = reference_failure("workflow_id", "Workflow does not exist.");
        assert!(errors.field_errors().contains_key("workflow_id"));
    }
}
