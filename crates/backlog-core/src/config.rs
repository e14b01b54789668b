use crate::compile::CompileOptions;
use crate::error::{BacklogError, Result};
use crate::paths;
use crate::splitter::DEFAULT_SPLIT_THRESHOLD;
use serde::Deserialize;
use std::path::Path;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// `.backlog/config.yaml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Specs bullets a task may hold before it is split.
    #[serde(default = "default_split_threshold")]
    pub split_threshold: usize,
    /// Delete task documents that the current PRD no longer produces.
    #[serde(default)]
    pub prune_stale: bool,
}

fn default_split_threshold() -> usize {
    DEFAULT_SPLIT_THRESHOLD
}

impl Default for Config {
    fn default() -> Self {
        Self {
            split_threshold: default_split_threshold(),
            prune_stale: false,
        }
    }
}

impl Config {
    /// Load the project config; a missing file yields the defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.split_threshold == 0 {
            return Err(BacklogError::InvalidThreshold(self.split_threshold));
        }
        Ok(())
    }

    /// Compile options with an optional command-line threshold override.
    pub fn compile_options(&self, threshold: Option<usize>, no_split: bool) -> CompileOptions {
        CompileOptions {
            split_threshold: threshold.unwrap_or(self.split_threshold),
            no_split,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.split_threshold, 6);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let cfg: Config = serde_yaml::from_str("split_threshold: 4\n").unwrap();
        assert_eq!(cfg.split_threshold, 4);
        assert!(!cfg.prune_stale);
    }

    #[test]
    fn config_file_is_read() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(paths::backlog_dir(dir.path())).unwrap();
        std::fs::write(
            paths::config_path(dir.path()),
            "version: 1\nsplit_threshold: 3\nprune_stale: true\n",
        )
        .unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.split_threshold, 3);
        assert!(cfg.prune_stale);
    }

    #[test]
    fn zero_threshold_rejected_on_load() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(paths::backlog_dir(dir.path())).unwrap();
        std::fs::write(paths::config_path(dir.path()), "split_threshold: 0\n").unwrap();
        assert!(matches!(
            Config::load(dir.path()).unwrap_err(),
            BacklogError::InvalidThreshold(0)
        ));
    }

    #[test]
    fn flag_overrides_config() {
        let cfg = Config::default();
        assert_eq!(cfg.compile_options(None, false).split_threshold, 6);
        let opts = cfg.compile_options(Some(2), true);
        assert_eq!(opts.split_threshold, 2);
        assert!(opts.no_split);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(paths::backlog_dir(dir.path())).unwrap();
        std::fs::write(paths::config_path(dir.path()), "split_threshold: [").unwrap();
        assert!(matches!(
            Config::load(dir.path()).unwrap_err(),
            BacklogError::Yaml(_)
        ));
    }
}
