//! Damaged spring arrangement counter.
//!
//! Reads condition records (`???.### 1,1,3`, one per line) and prints the
//! summed arrangement counts for the records as written and unfolded.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use springs::core::counter::count;
use springs::core::parse::parse_record;
use springs::core::unfold::unfold_by;
use springs::exit_codes;
use springs::io::config::{DEFAULT_CONFIG_FILE, SpringsConfig, load_config};
use springs::io::input::InputSource;
use springs::logging;
use springs::tally::{LineFailure, tally_source};
use springs::verify::verify_source;

#[derive(Parser)]
#[command(
    name = "springs",
    version,
    about = "Count damaged spring arrangements in condition records"
)]
struct Cli {
    /// Config file (TOML); defaults apply when it does not exist.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sum arrangement counts over every line, folded and unfolded.
    Sum {
        /// Input file; stdin when omitted or `-`.
        input: Option<PathBuf>,
        /// Print the full tally as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Count arrangements for a single record.
    Count {
        /// Record line, e.g. `"???.### 1,1,3"`.
        line: String,
        /// Count the unfolded record instead.
        #[arg(short, long)]
        unfold: bool,
    },
    /// Cross-check memoized counts against exhaustive enumeration.
    Verify {
        /// Input file; stdin when omitted or `-`.
        input: Option<PathBuf>,
        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let cfg = load_config(&cli.config)?;
    match cli.command {
        Command::Sum { input, json } => cmd_sum(input, json, &cfg),
        Command::Count { line, unfold } => cmd_count(&line, unfold, &cfg),
        Command::Verify { input, json } => cmd_verify(input, json, &cfg),
    }
}

fn cmd_sum(input: Option<PathBuf>, json: bool, cfg: &SpringsConfig) -> Result<i32> {
    let source = InputSource::from_arg(input.as_deref());
    let tally = tally_source(&source, cfg)?;
    if json {
        print_json(&tally)?;
    } else {
        println!("folded: {}", tally.folded);
        println!("unfolded: {}", tally.unfolded);
    }
    report_failures(&tally.failures);
    if tally.is_complete() {
        Ok(exit_codes::OK)
    } else {
        Ok(exit_codes::PARTIAL)
    }
}

fn cmd_count(line: &str, unfold: bool, cfg: &SpringsConfig) -> Result<i32> {
    let mut record = parse_record(line).with_context(|| format!("parse '{line}'"))?;
    if unfold {
        record = unfold_by(&record, cfg.unfold_copies);
    }
    let total = count(&record).with_context(|| format!("count '{line}'"))?;
    println!("{total}");
    Ok(exit_codes::OK)
}

fn cmd_verify(input: Option<PathBuf>, json: bool, cfg: &SpringsConfig) -> Result<i32> {
    let source = InputSource::from_arg(input.as_deref());
    let report = verify_source(&source, cfg)?;
    if json {
        print_json(&report)?;
    } else {
        println!(
            "verify: checked={} skipped={} mismatches={}",
            report.checked,
            report.skipped,
            report.mismatches.len()
        );
        for mismatch in &report.mismatches {
            println!(
                "mismatch: line={} variant={:?} memoized={} enumerated={}",
                mismatch.line_no, mismatch.variant, mismatch.memoized, mismatch.enumerated
            );
        }
    }
    report_failures(&report.failures);
    if !report.is_consistent() {
        Ok(exit_codes::MISMATCH)
    } else if !report.failures.is_empty() {
        Ok(exit_codes::PARTIAL)
    } else {
        Ok(exit_codes::OK)
    }
}

fn report_failures(failures: &[LineFailure]) {
    for failure in failures {
        eprintln!("line {}: {}", failure.line_no, failure.error);
    }
}

/// Print `value` as pretty JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value).context("serialize json")?;
    println!("{payload}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sum_defaults_to_stdin() {
        let cli = Cli::parse_from(["springs", "sum"]);
        assert!(matches!(
            cli.command,
            Command::Sum {
                input: None,
                json: false
            }
        ));
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn parse_count_unfold() {
        let cli = Cli::parse_from(["springs", "count", "???.### 1,1,3", "--unfold"]);
        match cli.command {
            Command::Count { line, unfold } => {
                assert_eq!(line, "???.### 1,1,3");
                assert!(unfold);
            }
            _ => panic!("expected count command"),
        }
    }

    #[test]
    fn parse_global_config_after_subcommand() {
        let cli = Cli::parse_from(["springs", "verify", "input.txt", "--config", "alt.toml"]);
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
        assert!(matches!(cli.command, Command::Verify { json: false, .. }));
    }
}
