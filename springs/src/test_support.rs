//! Test-only helpers for building records and input files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::parse::parse_record;
use crate::core::types::{ConditionRecord, Symbol};

/// The six example records; folded total 21, unfolded total 525152.
pub const SAMPLE_INPUT: &str = "\
???.### 1,1,3
.??..??...?##. 1,1,3
?#?#?#?#?#?#?#? 1,3,1,6
????.#...#... 4,1,1
????.######..#####. 1,6,5
?###???????? 3,2,1
";

/// Parse a record line, panicking on malformed test input.
pub fn record(line: &str) -> ConditionRecord {
    parse_record(line).unwrap_or_else(|err| panic!("bad test record {line:?}: {err}"))
}

/// A record of `len` Unknown symbols with the given groups.
pub fn all_unknown(len: usize, groups: &[usize]) -> ConditionRecord {
    ConditionRecord::new(vec![Symbol::Unknown; len], groups.to_vec())
}

/// Surround `record` with `before` and `after` Functional symbols.
pub fn padded(record: &ConditionRecord, before: usize, after: usize) -> ConditionRecord {
    let mut symbols = vec![Symbol::Functional; before];
    symbols.extend_from_slice(&record.symbols);
    symbols.extend(std::iter::repeat_n(Symbol::Functional, after));
    ConditionRecord::new(symbols, record.groups.clone())
}

/// An input file inside a temporary directory, removed on drop.
pub struct InputFile {
    dir: TempDir,
    path: PathBuf,
}

impl InputFile {
    /// Write `contents` to `input.txt` in a fresh temp directory.
    pub fn new(contents: impl AsRef<[u8]>) -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        let path = dir.path().join("input.txt");
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(Self { dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the input; usable as a working directory.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `springs.toml` next to the input.
    pub fn write_config(&self, contents: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(crate::io::config::DEFAULT_CONFIG_FILE);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}
