//! Fivefold unfolding of a condition record.

use crate::core::types::{ConditionRecord, Symbol};

/// Replication factor of the unfolded variant.
pub const UNFOLD_COPIES: usize = 5;

/// Unfold `record` [`UNFOLD_COPIES`] times.
pub fn unfold(record: &ConditionRecord) -> ConditionRecord {
    unfold_by(record, UNFOLD_COPIES)
}

/// Repeat the symbols `copies` times joined by a single [`Symbol::Unknown`],
/// and concatenate `copies` repetitions of the groups.
///
/// `copies == 1` returns an equal record; `copies == 0` an empty one.
pub fn unfold_by(record: &ConditionRecord, copies: usize) -> ConditionRecord {
    let mut symbols = Vec::with_capacity((record.symbols.len() + 1) * copies);
    for copy in 0..copies {
        if copy > 0 {
            symbols.push(Symbol::Unknown);
        }
        symbols.extend_from_slice(&record.symbols);
    }

    ConditionRecord {
        symbols,
        groups: record.groups.repeat(copies),
    }
}
