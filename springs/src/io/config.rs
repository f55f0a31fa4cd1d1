//! Configuration stored in `springs.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::unfold::UNFOLD_COPIES;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "springs.toml";

/// Arrangement counter configuration (TOML).
///
/// Missing fields default to the standard puzzle settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SpringsConfig {
    /// Replication factor for the unfolded column.
    pub unfold_copies: usize,

    /// Abort the batch on the first failed line instead of reporting it and
    /// moving on.
    pub fail_fast: bool,

    pub verify: VerifyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VerifyConfig {
    /// Records with more Unknown symbols than this are not enumerated.
    pub max_unknowns: usize,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self { max_unknowns: 20 }
    }
}

impl Default for SpringsConfig {
    fn default() -> Self {
        Self {
            unfold_copies: UNFOLD_COPIES,
            fail_fast: false,
            verify: VerifyConfig::default(),
        }
    }
}

impl SpringsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.unfold_copies == 0 {
            return Err(anyhow!("unfold_copies must be > 0"));
        }
        if self.verify.max_unknowns == 0 || self.verify.max_unknowns > 30 {
            return Err(anyhow!("verify.max_unknowns must be in 1..=30"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SpringsConfig::default()`.
pub fn load_config(path: &Path) -> Result<SpringsConfig> {
    if !path.exists() {
        let cfg = SpringsConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SpringsConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, SpringsConfig::default());
        assert_eq!(cfg.unfold_copies, 5);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "fail_fast = true\n[verify]\nmax_unknowns = 12\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert!(cfg.fail_fast);
        assert_eq!(cfg.verify.max_unknowns, 12);
        assert_eq!(cfg.unfold_copies, UNFOLD_COPIES);
    }

    #[test]
    fn rejects_zero_unfold_copies() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "unfold_copies = 0\n").expect("write");
        let err = load_config(&path).expect_err("invalid");
        assert!(format!("{err:#}").contains("unfold_copies must be > 0"));
    }

    #[test]
    fn rejects_unbounded_enumeration() {
        let cfg = SpringsConfig {
            verify: VerifyConfig { max_unknowns: 40 },
            ..SpringsConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
