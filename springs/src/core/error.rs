use thiserror::Error;

/// Failures of the pure record pipeline (parse, count, enumerate).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The line could not be turned into a record.
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    /// A zero-length group reached the counter. The parser never produces
    /// one, so this points at a caller building records by hand.
    #[error("invalid group spec: group {index} has length 0")]
    InvalidGroupSpec { index: usize },

    /// Exhaustive enumeration refused to walk `2^unknowns` assignments.
    #[error("enumeration limit: {unknowns} unknown symbols exceeds limit of {limit}")]
    EnumerationLimit { unknowns: usize, limit: usize },

    /// The arrangement count, or a column total, does not fit in a `u128`.
    #[error("count overflow: arrangements exceed {}", u128::MAX)]
    CountOverflow,
}

impl RecordError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }
}
