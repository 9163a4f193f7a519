//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO for full-overwrite updates
//!
//! All entities embed the shared [`audit::AuditTrail`] columns.

pub mod audit;
pub mod set_step;
pub mod workflow;
pub mod workflow_step;
