//! Reading condition record lines from a file or stdin.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::error::RecordError;

/// Where record lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Map a CLI argument to a source; absent or `-` means stdin.
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            Some(path) if path != Path::new("-") => Self::File(path.to_path_buf()),
            _ => Self::Stdin,
        }
    }
}

/// One non-blank input line with its 1-based line number.
///
/// Lines that are not valid UTF-8 keep a lossy `text` for reporting and are
/// refused by [`InputLine::checked_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    pub line_no: usize,
    pub text: String,
    pub valid_utf8: bool,
}

impl InputLine {
    /// The trimmed line, or `MalformedInput` if the raw bytes were not UTF-8.
    pub fn checked_text(&self) -> Result<&str, RecordError> {
        if self.valid_utf8 {
            Ok(&self.text)
        } else {
            Err(RecordError::malformed("line is not valid UTF-8"))
        }
    }
}

/// Read every non-blank line from `source`.
pub fn read_lines(source: &InputSource) -> Result<Vec<InputLine>> {
    let contents = match source {
        InputSource::Stdin => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("read stdin")?;
            buf
        }
        InputSource::File(path) => {
            fs::read(path).with_context(|| format!("read {}", path.display()))?
        }
    };
    let lines = split_bytes(&contents);
    debug!(source = ?source, lines = lines.len(), "input loaded");
    Ok(lines)
}

/// Split `contents` into numbered lines, dropping blank ones.
pub fn split_lines(contents: &str) -> Vec<InputLine> {
    split_bytes(contents.as_bytes())
}

/// Split raw bytes on `\n` and decode each line on its own, so one bad line
/// does not cost the rest of the batch.
pub fn split_bytes(contents: &[u8]) -> Vec<InputLine> {
    contents
        .split(|byte| *byte == b'\n')
        .enumerate()
        .filter_map(|(idx, raw)| {
            let text = String::from_utf8_lossy(raw);
            let text = text.trim();
            (!text.is_empty()).then(|| InputLine {
                line_no: idx + 1,
                text: text.to_string(),
                valid_utf8: std::str::from_utf8(raw).is_ok(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_skips_blanks_and_keeps_numbers() {
        let lines = split_lines("???.### 1,1,3\n\n  \n?###???????? 3,2,1\r\n");
        assert_eq!(
            lines,
            vec![
                InputLine {
                    line_no: 1,
                    text: "???.### 1,1,3".to_string(),
                    valid_utf8: true,
                },
                InputLine {
                    line_no: 4,
                    text: "?###???????? 3,2,1".to_string(),
                    valid_utf8: true,
                },
            ]
        );
    }

    #[test]
    fn invalid_utf8_is_confined_to_its_line() {
        let lines = split_bytes(b"# 1\n?\xff? 1\n\n.# 1");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].checked_text(), Ok("# 1"));
        assert_eq!(lines[1].line_no, 2);
        assert_eq!(
            lines[1].checked_text(),
            Err(RecordError::malformed("line is not valid UTF-8"))
        );
        assert_eq!(lines[1].text, "?\u{fffd}? 1");
        assert_eq!(lines[2].line_no, 4);
        assert_eq!(lines[2].checked_text(), Ok(".# 1"));
    }

    #[test]
    fn dash_means_stdin() {
        assert_eq!(InputSource::from_arg(None), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg(Some(Path::new("-"))),
            InputSource::Stdin
        );
        assert_eq!(
            InputSource::from_arg(Some(Path::new("input.txt"))),
            InputSource::File(PathBuf::from("input.txt"))
        );
    }

    #[test]
    fn read_lines_from_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("input.txt");
        fs::write(&path, "# 1\n").expect("write");
        let lines = read_lines(&InputSource::File(path)).expect("read");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "# 1");
    }

    #[test]
    fn read_lines_keeps_valid_lines_around_bad_bytes() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("input.txt");
        fs::write(&path, b"# 1\n\xfe\xff 1\n").expect("write");
        let lines = read_lines(&InputSource::File(path)).expect("read");
        assert_eq!(lines.len(), 2);
        assert!(lines[0].valid_utf8);
        assert!(!lines[1].valid_utf8);
    }

    #[test]
    fn read_lines_reports_missing_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("missing.txt");
        let err = read_lines(&InputSource::File(path.clone())).expect_err("missing");
        assert!(err.to_string().contains(&path.display().to_string()));
    }
}
