//! Workflow step rules.

use std::sync::LazyLock;

use regex::Regex;

/// Lowest allowed step sequence number.
pub const MIN_SEQUENCE: i32 = 1;

/// Highest allowed step sequence number.
///
/// The sequence is a display/ordering hint only; it is not unique within a
/// workflow.
pub const MAX_SEQUENCE: i32 = 99;

/// Step names follow the `step<number>` convention (step1, step2, ...),
/// case-insensitive.
pub static STEP_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)step[0-9]+$").expect("valid step name pattern"));
