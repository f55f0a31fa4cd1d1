//! Cross-check of the memoized counter against exhaustive enumeration.

use anyhow::{Result, anyhow};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::brute_force;
use crate::core::counter;
use crate::core::error::RecordError;
use crate::core::parse::parse_record;
use crate::core::types::ConditionRecord;
use crate::core::unfold::unfold_by;
use crate::io::config::SpringsConfig;
use crate::io::input::{InputLine, InputSource, read_lines};
use crate::tally::LineFailure;

/// Which form of the record was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Folded,
    Unfolded,
}

/// The counter and the enumerator disagree on one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub line_no: usize,
    pub variant: Variant,
    pub memoized: u128,
    pub enumerated: u128,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    /// Records enumerated and compared.
    pub checked: usize,
    /// Records with too many Unknown symbols to enumerate.
    pub skipped: usize,
    pub mismatches: Vec<Mismatch>,
    pub failures: Vec<LineFailure>,
}

impl VerifyReport {
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Compare both counts for `record`.
///
/// Returns `Ok(None)` when the record is too large to enumerate.
fn check_record(
    record: &ConditionRecord,
    max_unknowns: usize,
) -> Result<Option<(u128, u128)>, RecordError> {
    let memoized = counter::count(record)?;
    match brute_force::count(record, max_unknowns) {
        Ok(enumerated) => Ok(Some((memoized, enumerated))),
        Err(RecordError::EnumerationLimit { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Verify one line, folded and unfolded, recording results into `report`.
fn verify_line(
    line: &InputLine,
    cfg: &SpringsConfig,
    report: &mut VerifyReport,
) -> Result<(), RecordError> {
    let record = parse_record(line.checked_text()?)?;
    let unfolded = unfold_by(&record, cfg.unfold_copies);
    for (variant, candidate) in [(Variant::Folded, &record), (Variant::Unfolded, &unfolded)] {
        match check_record(candidate, cfg.verify.max_unknowns)? {
            None => {
                debug!(
                    line_no = line.line_no,
                    ?variant,
                    unknowns = candidate.unknown_count(),
                    "too large to enumerate"
                );
                report.skipped += 1;
            }
            Some((memoized, enumerated)) => {
                report.checked += 1;
                if memoized != enumerated {
                    warn!(
                        line_no = line.line_no,
                        ?variant,
                        memoized,
                        enumerated,
                        "count mismatch"
                    );
                    report.mismatches.push(Mismatch {
                        line_no: line.line_no,
                        variant,
                        memoized,
                        enumerated,
                    });
                }
            }
        }
    }
    Ok(())
}

/// Verify every line; parse failures are collected like in `tally`.
pub fn verify_lines(lines: &[InputLine], cfg: &SpringsConfig) -> Result<VerifyReport> {
    let mut report = VerifyReport::default();
    for line in lines {
        if let Err(err) = verify_line(line, cfg, &mut report) {
            if cfg.fail_fast {
                return Err(anyhow!("line {}: {}", line.line_no, err));
            }
            warn!(line_no = line.line_no, line = %line.text, error = %err, "line skipped");
            report.failures.push(LineFailure::new(line, err));
        }
    }
    info!(
        checked = report.checked,
        skipped = report.skipped,
        mismatches = report.mismatches.len(),
        "verification finished"
    );
    Ok(report)
}

/// Read lines from `source` and verify them.
pub fn verify_source(source: &InputSource, cfg: &SpringsConfig) -> Result<VerifyReport> {
    let lines = read_lines(source)?;
    verify_lines(&lines, cfg)
}
