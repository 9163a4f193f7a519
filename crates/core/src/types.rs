/// All entity and actor identifiers are UUIDs generated by the database.
/// The nil UUID is never a valid reference.
pub type Id = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
