//! Workflow naming rules.
//!
//! A workflow name is the only user-facing unique key in the definition
//! graph; the pattern below keeps names presentable in picker lists.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum workflow name length.
pub const MIN_NAME_LENGTH: u64 = 3;

/// Maximum workflow name length.
pub const MAX_NAME_LENGTH: u64 = 50;

/// Maximum workflow description length.
pub const MAX_DESCRIPTION_LENGTH: u64 = 500;

/// Letters only, with single spaces between words.
pub static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+(?: [A-Za-z]+)*$").expect("valid name pattern"));
