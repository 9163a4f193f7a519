//! Request handlers for the workflow definition resources.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers run the shared shape: validate the DTO, resolve uniqueness and
//! referential checks, then delegate to the repository in `flowdef_db`,
//! mapping `None`/`false` results to [`crate::error::AppError`].

pub mod directory;
pub mod set_step;
pub mod workflow;
pub mod workflow_step;

use flowdef_core::types::Id;
use serde::Deserialize;

/// Query parameters accepted by delete endpoints.
///
/// Deletes stamp the acting user into the audit trail, so the actor is an
/// explicit parameter on every mutating call -- there is no ambient
/// identity.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub actor_id: Id,
}
