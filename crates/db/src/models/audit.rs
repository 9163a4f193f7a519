//! Shared audit/versioning columns embedded in every entity table.

use flowdef_core::types::{Id, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Audit trail carried by every workflow definition entity.
///
/// `revision_id` is an opaque version token regenerated on each mutation.
/// `old_data` and `new_data` hold the serialized before/after snapshots of
/// the most recent mutation (a single last-change snapshot, not full
/// history). A non-null `deleted_at` marks the row as logically deleted;
/// rows are never physically removed by the stores.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AuditTrail {
    pub revision_id: Id,
    pub created_by: Id,
    pub created_at: Timestamp,
    pub updated_by: Option<Id>,
    pub updated_at: Option<Timestamp>,
    pub old_data: Option<serde_json::Value>,
    pub new_data: Option<serde_json::Value>,
    pub deleted_at: Option<Timestamp>,
}
