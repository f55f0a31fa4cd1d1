//! Stable exit codes for springs CLI commands.

/// Every line was counted (or verified without disagreement).
pub const OK: i32 = 0;
/// Command failed before producing totals: unreadable input, invalid config,
/// or the single record given to `springs count` was rejected.
pub const INVALID: i32 = 1;
/// Some lines failed; totals cover the remaining lines.
pub const PARTIAL: i32 = 2;
/// `springs verify` found a record where the counter and enumeration disagree.
pub const MISMATCH: i32 = 3;
