//! Batch counting for `springs sum` and `springs count`.
//!
//! Each line is parsed, counted as written and counted unfolded; both columns
//! are summed. A line that fails is recorded and the batch moves on, unless
//! `fail_fast` is configured.

use anyhow::{Result, anyhow};
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::core::counter::count_with_stats;
use crate::core::error::RecordError;
use crate::core::parse::parse_record;
use crate::core::unfold::unfold_by;
use crate::io::config::SpringsConfig;
use crate::io::input::{InputLine, InputSource, read_lines};

/// Both counts for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineCounts {
    pub line_no: usize,
    pub folded: u128,
    pub unfolded: u128,
}

/// A line that could not be counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineFailure {
    pub line_no: usize,
    pub line: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: RecordError,
}

impl LineFailure {
    pub fn new(line: &InputLine, error: RecordError) -> Self {
        Self {
            line_no: line.line_no,
            line: line.text.clone(),
            error,
        }
    }
}

/// Column totals plus per-line results for a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub folded: u128,
    pub unfolded: u128,
    pub lines: Vec<LineCounts>,
    pub failures: Vec<LineFailure>,
}

impl Tally {
    /// True when every line was counted.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Add one line to both columns; the totals are untouched on overflow.
    fn add(&mut self, counts: LineCounts) -> Result<(), RecordError> {
        let folded = self.folded.checked_add(counts.folded);
        let unfolded = self.unfolded.checked_add(counts.unfolded);
        let (Some(folded), Some(unfolded)) = (folded, unfolded) else {
            return Err(RecordError::CountOverflow);
        };
        self.folded = folded;
        self.unfolded = unfolded;
        self.lines.push(counts);
        Ok(())
    }
}

/// Parse one line and count it both folded and unfolded `unfold_copies` times.
pub fn count_line(line: &InputLine, unfold_copies: usize) -> Result<LineCounts, RecordError> {
    let record = parse_record(line.checked_text()?)?;
    let (folded, folded_stats) = count_with_stats(&record)?;
    let (unfolded, unfolded_stats) = count_with_stats(&unfold_by(&record, unfold_copies))?;
    debug!(
        line_no = line.line_no,
        folded,
        unfolded,
        calls = folded_stats.calls + unfolded_stats.calls,
        memo_hits = folded_stats.memo_hits + unfolded_stats.memo_hits,
        memo_entries = unfolded_stats.memo_entries,
        "record counted"
    );
    Ok(LineCounts {
        line_no: line.line_no,
        folded,
        unfolded,
    })
}

/// Count every line and sum the two columns.
///
/// Errors only when `cfg.fail_fast` is set and a line fails; otherwise
/// failures are collected in [`Tally::failures`].
pub fn tally_lines(lines: &[InputLine], cfg: &SpringsConfig) -> Result<Tally> {
    let mut tally = Tally::default();
    for line in lines {
        match count_line(line, cfg.unfold_copies).and_then(|counts| tally.add(counts)) {
            Ok(()) => {}
            Err(err) if cfg.fail_fast => {
                return Err(anyhow!("line {}: {}", line.line_no, err));
            }
            Err(err) => {
                warn!(line_no = line.line_no, line = %line.text, error = %err, "line skipped");
                tally.failures.push(LineFailure::new(line, err));
            }
        }
    }
    info!(
        records = tally.lines.len(),
        failures = tally.failures.len(),
        folded = tally.folded,
        unfolded = tally.unfolded,
        "batch counted"
    );
    Ok(tally)
}

/// Read lines from `source` and tally them.
pub fn tally_source(source: &InputSource, cfg: &SpringsConfig) -> Result<Tally> {
    let lines = read_lines(source)?;
    tally_lines(&lines, cfg)
}

fn serialize_display<S: Serializer>(
    error: &RecordError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::input::{split_bytes, split_lines};
    use crate::test_support::SAMPLE_INPUT;

    #[test]
    fn sums_sample_input() {
        let tally =
            tally_lines(&split_lines(SAMPLE_INPUT), &SpringsConfig::default()).expect("tally");
        assert_eq!(tally.folded, 21);
        assert_eq!(tally.unfolded, 525152);
        assert_eq!(tally.lines.len(), 6);
        assert!(tally.is_complete());
    }

    #[test]
    fn reports_bad_line_and_keeps_going() {
        let input = "???.### 1,1,3\n??x 1\n?###???????? 3,2,1\n";
        let tally = tally_lines(&split_lines(input), &SpringsConfig::default()).expect("tally");
        assert_eq!(tally.folded, 11);
        assert_eq!(tally.failures.len(), 1);
        assert_eq!(tally.failures[0].line_no, 2);
        assert_eq!(tally.failures[0].line, "??x 1");
        assert_eq!(
            tally.failures[0].error.to_string(),
            "malformed input: invalid symbol 'x' at column 3"
        );
    }

    #[test]
    fn long_unfolded_record_counts_past_u64() {
        let input = format!("{} 1,1,1\n# 1\n", "?".repeat(40));
        let tally = tally_lines(&split_lines(&input), &SpringsConfig::default()).expect("tally");
        assert!(tally.is_complete());
        assert_eq!(tally.folded, 8436 + 1);
        assert!(tally.unfolded > u128::from(u64::MAX));
    }

    #[test]
    fn column_overflow_is_a_line_failure() {
        let mut tally = Tally {
            folded: u128::MAX,
            ..Tally::default()
        };
        let counts = LineCounts {
            line_no: 7,
            folded: 1,
            unfolded: 1,
        };
        assert_eq!(tally.add(counts), Err(RecordError::CountOverflow));
        assert_eq!(tally.folded, u128::MAX);
        assert_eq!(tally.unfolded, 0);
        assert!(tally.lines.is_empty());
    }

    #[test]
    fn invalid_utf8_line_is_reported_and_skipped() {
        let input = b"???.### 1,1,3\n?\xff? 1\n?###???????? 3,2,1\n";
        let tally =
            tally_lines(&split_bytes(input), &SpringsConfig::default()).expect("tally");
        assert_eq!(tally.folded, 11);
        assert_eq!(tally.lines.len(), 2);
        assert_eq!(tally.failures.len(), 1);
        assert_eq!(tally.failures[0].line_no, 2);
        assert_eq!(
            tally.failures[0].error.to_string(),
            "malformed input: line is not valid UTF-8"
        );
    }

    #[test]
    fn fail_fast_stops_at_first_bad_line() {
        let cfg = SpringsConfig {
            fail_fast: true,
            ..SpringsConfig::default()
        };
        let err = tally_lines(&split_lines("# 1\n# 1,a\n"), &cfg).expect_err("fail fast");
        assert_eq!(
            err.to_string(),
            "line 2: malformed input: invalid group length 'a'"
        );
    }

    #[test]
    fn unfold_copies_come_from_config() {
        let cfg = SpringsConfig {
            unfold_copies: 1,
            ..SpringsConfig::default()
        };
        let tally = tally_lines(&split_lines("????.#...#... 4,1,1\n"), &cfg).expect("tally");
        assert_eq!(tally.unfolded, tally.folded);
    }

    #[test]
    fn failures_serialize_with_message() {
        let tally =
            tally_lines(&split_lines("?? 0\n"), &SpringsConfig::default()).expect("tally");
        let json = serde_json::to_value(&tally).expect("json");
        assert_eq!(
            json["failures"][0]["error"],
            "malformed input: group lengths must be positive"
        );
    }
}
