//! Exhaustive enumeration of Unknown assignments.
//!
//! Walks all `2^u` resolutions of a record with `u` Unknown symbols and checks
//! each one literally. Only usable on small records; it exists to cross-check
//! the memoized counter.

use crate::core::counter::validate_groups;
use crate::core::error::RecordError;
use crate::core::types::{ConditionRecord, Symbol};

/// Upper bound accepted for `max_unknowns`; assignments are indexed by a `u64`.
pub const MAX_ENUMERABLE_UNKNOWNS: usize = 63;

/// True if `symbols` is fully resolved and its damaged runs equal `groups`.
pub fn is_valid_resolution(symbols: &[Symbol], groups: &[usize]) -> bool {
    if symbols.contains(&Symbol::Unknown) {
        return false;
    }
    let mut runs = symbols
        .split(|symbol| *symbol == Symbol::Functional)
        .filter(|run| !run.is_empty())
        .map(<[Symbol]>::len);
    let mut expected = groups.iter().copied();
    loop {
        match (runs.next(), expected.next()) {
            (None, None) => return true,
            (Some(run), Some(len)) if run == len => {}
            _ => return false,
        }
    }
}

/// Count valid resolutions by trying every assignment.
///
/// Refuses with [`RecordError::EnumerationLimit`] when the record has more
/// than `max_unknowns` Unknown symbols (capped at [`MAX_ENUMERABLE_UNKNOWNS`]).
pub fn count(record: &ConditionRecord, max_unknowns: usize) -> Result<u128, RecordError> {
    validate_groups(&record.groups)?;
    let limit = max_unknowns.min(MAX_ENUMERABLE_UNKNOWNS);
    let unknowns: Vec<usize> = record
        .symbols
        .iter()
        .enumerate()
        .filter(|(_, symbol)| **symbol == Symbol::Unknown)
        .map(|(pos, _)| pos)
        .collect();
    if unknowns.len() > limit {
        return Err(RecordError::EnumerationLimit {
            unknowns: unknowns.len(),
            limit,
        });
    }

    let mut resolved = record.symbols.clone();
    let mut total: u128 = 0;
    for assignment in 0..(1u64 << unknowns.len()) {
        for (bit, pos) in unknowns.iter().enumerate() {
            resolved[*pos] = if assignment & (1 << bit) != 0 {
                Symbol::Damaged
            } else {
                Symbol::Functional
            };
        }
        if is_valid_resolution(&resolved, &record.groups) {
            total += 1;
        }
    }
    Ok(total)
}
