//! Line parser for condition records.
//!
//! Accepts `<pattern> <lengths>`, e.g. `???.### 1,1,3`. The pattern is kept
//! exactly as written: surrounding `.` symbols matter once a record is
//! unfolded, so trimming is left to the counter.

use std::str::FromStr;

use crate::core::error::RecordError;
use crate::core::types::{ConditionRecord, Symbol};

/// Parse one input line into a [`ConditionRecord`].
pub fn parse_record(line: &str) -> Result<ConditionRecord, RecordError> {
    let mut fields = line.split_whitespace();
    let pattern = fields
        .next()
        .ok_or_else(|| RecordError::malformed("empty line"))?;
    let Some(lengths) = fields.next() else {
        // A lone field of digits is a length list without its pattern.
        if pattern.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(RecordError::malformed(format!("missing pattern before '{pattern}'")));
        }
        return Err(RecordError::malformed(format!(
            "missing group lengths after '{pattern}'"
        )));
    };
    if let Some(extra) = fields.next() {
        return Err(RecordError::malformed(format!("unexpected field '{extra}'")));
    }

    Ok(ConditionRecord {
        symbols: parse_pattern(pattern)?,
        groups: parse_lengths(lengths)?,
    })
}

fn parse_pattern(pattern: &str) -> Result<Vec<Symbol>, RecordError> {
    pattern
        .char_indices()
        .map(|(pos, c)| {
            Symbol::from_char(c).ok_or_else(|| {
                RecordError::malformed(format!("invalid symbol '{c}' at column {}", pos + 1))
            })
        })
        .collect()
}

fn parse_lengths(lengths: &str) -> Result<Vec<usize>, RecordError> {
    lengths
        .split(',')
        .map(|raw| {
            if !raw.starts_with(|c: char| c.is_ascii_digit()) {
                return Err(RecordError::malformed(format!("invalid group length '{raw}'")));
            }
            let len: usize = raw
                .parse()
                .map_err(|_| RecordError::malformed(format!("invalid group length '{raw}'")))?;
            if len == 0 {
                return Err(RecordError::malformed("group lengths must be positive"));
            }
            Ok(len)
        })
        .collect()
}

impl FromStr for ConditionRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_record(s)
    }
}
