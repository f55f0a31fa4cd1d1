//! Memoized slot search counting the valid resolutions of a record.
//!
//! The search places groups left to right. For the current group it scans
//! the remaining suffix for slots (maximal runs of `#`/`?`), tries every
//! offset in each slot that is wide enough, marks the placed run damaged in
//! a scratch buffer, recurses past the run and its mandatory separator, and
//! restores the buffer before the next offset.
//!
//! Results are memoized on `(remaining length, group index)`. Every call
//! works on a positional suffix of the same buffer, and nothing before the
//! suffix start is read again, so equal keys always describe the same
//! residual problem.
//!
//! Counts are `u128` and every addition is checked: unfolded records with a
//! few dozen unknowns already exceed `u64`.

use crate::core::error::RecordError;
use crate::core::types::{ConditionRecord, Symbol};

/// Counters collected during one [`count_with_stats`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Recursive search calls, including base cases.
    pub calls: u64,
    /// Calls answered from the memo.
    pub memo_hits: u64,
    /// Distinct `(remaining length, group index)` keys stored.
    pub memo_entries: usize,
}

/// Number of ways to resolve every [`Symbol::Unknown`] in `record` so that its
/// damaged runs equal `record.groups`, in order.
pub fn count(record: &ConditionRecord) -> Result<u128, RecordError> {
    count_with_stats(record).map(|(total, _)| total)
}

/// Like [`count`], also returning search statistics.
///
/// Fails with [`RecordError::InvalidGroupSpec`] before searching if any group
/// length is zero, and with [`RecordError::CountOverflow`] if the count does
/// not fit in a `u128`.
pub fn count_with_stats(record: &ConditionRecord) -> Result<(u128, SearchStats), RecordError> {
    validate_groups(&record.groups)?;
    let mut search = SlotSearch::new(trim_functional(&record.symbols), &record.groups);
    let total = search.count_from(0, 0)?;
    Ok((total, search.stats()))
}

pub(crate) fn validate_groups(groups: &[usize]) -> Result<(), RecordError> {
    match groups.iter().position(|len| *len == 0) {
        Some(index) => Err(RecordError::InvalidGroupSpec { index }),
        None => Ok(()),
    }
}

/// Strip leading and trailing `.`; they can neither host nor split a group.
fn trim_functional(symbols: &[Symbol]) -> &[Symbol] {
    let start = symbols
        .iter()
        .position(|symbol| symbol.can_be_damaged())
        .unwrap_or(symbols.len());
    let end = symbols
        .iter()
        .rposition(|symbol| symbol.can_be_damaged())
        .map_or(start, |last| last + 1);
    &symbols[start..end]
}

/// Fixed-size table keyed by `(remaining length, group index)`.
struct Memo {
    width: usize,
    table: Vec<Option<u128>>,
    entries: usize,
}

impl Memo {
    fn new(buffer_len: usize, group_count: usize) -> Self {
        let width = group_count + 1;
        Self {
            width,
            table: vec![None; (buffer_len + 1) * width],
            entries: 0,
        }
    }

    fn get(&self, remaining: usize, group_index: usize) -> Option<u128> {
        self.table[remaining * self.width + group_index]
    }

    fn insert(&mut self, remaining: usize, group_index: usize, total: u128) {
        let slot = &mut self.table[remaining * self.width + group_index];
        if slot.replace(total).is_none() {
            self.entries += 1;
        }
    }
}

struct SlotSearch<'a> {
    /// Working copy of the trimmed symbols; mutated only inside a trial.
    scratch: Vec<Symbol>,
    groups: &'a [usize],
    /// Symbols overwritten by in-flight placements, innermost last.
    trail: Vec<Symbol>,
    memo: Memo,
    calls: u64,
    memo_hits: u64,
}

impl<'a> SlotSearch<'a> {
    fn new(symbols: &[Symbol], groups: &'a [usize]) -> Self {
        Self {
            scratch: symbols.to_vec(),
            groups,
            trail: Vec::with_capacity(symbols.len()),
            memo: Memo::new(symbols.len(), groups.len()),
            calls: 0,
            memo_hits: 0,
        }
    }

    fn stats(&self) -> SearchStats {
        SearchStats {
            calls: self.calls,
            memo_hits: self.memo_hits,
            memo_entries: self.memo.entries,
        }
    }

    /// Count resolutions of `scratch[start..]` that place `groups[group_index..]`.
    fn count_from(&mut self, start: usize, group_index: usize) -> Result<u128, RecordError> {
        self.calls += 1;
        let remaining = self.scratch.len() - start;

        if group_index >= self.groups.len() {
            // A leftover `#` would form a run no group accounts for.
            return Ok(u128::from(!self.scratch[start..].contains(&Symbol::Damaged)));
        }
        if remaining == 0 {
            return Ok(0);
        }
        if let Some(total) = self.memo.get(remaining, group_index) {
            self.memo_hits += 1;
            return Ok(total);
        }

        let total = self.scan_slots(start, group_index)?;
        self.memo.insert(remaining, group_index, total);
        Ok(total)
    }

    fn scan_slots(&mut self, start: usize, group_index: usize) -> Result<u128, RecordError> {
        let len = self.scratch.len();
        let group_len = self.groups[group_index];
        // A run starting past the first `#` would skip that `#`, leaving it in
        // no group. Trials restore the suffix, so this stays fixed for the scan.
        let last_start = self.scratch[start..]
            .iter()
            .position(|symbol| *symbol == Symbol::Damaged)
            .map_or(len, |pos| start + pos);
        let mut total: u128 = 0;
        let mut cursor = start;

        loop {
            while self.scratch[cursor] == Symbol::Functional {
                cursor += 1;
                if cursor >= len {
                    return Ok(total);
                }
            }

            let slot_len = self.scratch[cursor..]
                .iter()
                .take_while(|symbol| symbol.can_be_damaged())
                .count();
            if slot_len >= group_len {
                for offset in 0..=slot_len - group_len {
                    let at = cursor + offset;
                    if at > last_start {
                        return Ok(total);
                    }
                    if self.separator_free(at + group_len) {
                        let found = self.place_and_count(at, group_len, group_index)?;
                        total = total
                            .checked_add(found)
                            .ok_or(RecordError::CountOverflow)?;
                    }
                }
            }

            cursor += slot_len;
            if cursor >= len {
                return Ok(total);
            }
        }
    }

    /// The symbol right after a run ending at `end` must be able to become `.`.
    fn separator_free(&self, end: usize) -> bool {
        end >= self.scratch.len() || self.scratch[end] != Symbol::Damaged
    }

    fn place_and_count(
        &mut self,
        at: usize,
        group_len: usize,
        group_index: usize,
    ) -> Result<u128, RecordError> {
        let end = at + group_len;
        let mark = self.trail.len();
        self.trail.extend_from_slice(&self.scratch[at..end]);
        self.scratch[at..end].fill(Symbol::Damaged);

        let next = (end + 1).min(self.scratch.len());
        let found = self.count_from(next, group_index + 1);

        self.scratch[at..end].copy_from_slice(&self.trail[mark..]);
        self.trail.truncate(mark);
        found
    }
}
