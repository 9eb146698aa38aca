use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parser::Keywords;
use crate::runner::RunnerConfig;

/// File name looked up in the scan directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = ".testoutline.toml";

/// Top-level configuration from `.testoutline.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub keywords: Keywords,
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

/// `[scan]` section: which files the directory walker picks up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Files larger than this many bytes are skipped.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Descend into hidden files and directories.
    #[serde(default)]
    pub include_hidden: bool,
}

fn default_max_file_size() -> u64 {
    1_048_576
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            include_hidden: false,
        }
    }
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.keywords.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Find the nearest `.testoutline.toml` at or above `start`.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        let dir = if start.is_file() {
            start.parent()?
        } else {
            start
        };
        dir.ancestors()
            .map(|d| d.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load the nearest config above `start`, or the default.
    pub fn load_nearest(start: &Path) -> Result<Self> {
        match Self::discover(start) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# test-outline configuration

[keywords]
# Calls that open a module. Used by both the parser and the .gjs/.gts scanner.
modules = ["describe", "module", "context"]
# Calls that declare a test.
tests = ["it", "test", "specify"]
# Array methods whose callback body is searched without adding a level.
iterators = ["forEach", "map", "filter", "every", "some"]

[runner]
# Test page of the dev server.
base_url = "http://localhost:4200/tests"
hide_passed = true

[scan]
# Skip files larger than this many bytes.
max_file_size = 1048576
include_hidden = false
"#
    }
}
