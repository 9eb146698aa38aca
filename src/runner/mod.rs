//! Test-runner URLs for a discovered module or test.
//!
//! QUnit names nested modules `"A > B"` and tests `"A > B: name"`, which is
//! exactly the display path produced by extraction, so the path doubles as
//! the runner's `filter` parameter.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{OutlineError, Result};
use crate::ir::{ModuleEntry, TestEntry};

/// `[runner]` section of `.testoutline.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Test page of the running dev server.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Append `hidepassed` so only failures are listed.
    #[serde(default = "default_hide_passed")]
    pub hide_passed: bool,
}

fn default_base_url() -> String {
    "http://localhost:4200/tests".into()
}

fn default_hide_passed() -> bool {
    true
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            hide_passed: default_hide_passed(),
        }
    }
}

/// What to run: a whole module, or a single test inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTarget {
    pub module: String,
    pub test: Option<String>,
    /// File the declaration came from.
    pub file: PathBuf,
}

impl RunTarget {
    pub fn module(module: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            module: module.into(),
            test: None,
            file: file.into(),
        }
    }

    pub fn test(
        module: impl Into<String>,
        test: impl Into<String>,
        file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            module: module.into(),
            test: Some(test.into()),
            file: file.into(),
        }
    }

    pub fn from_module_entry(entry: &ModuleEntry, file: &Path) -> Self {
        Self::module(entry.path.clone(), file)
    }

    pub fn from_test_entry(entry: &TestEntry, file: &Path) -> Self {
        Self::test(entry.module.clone(), entry.name.clone(), file)
    }

    /// Runner filter string: the module path, or `"<module>: <test>"`.
    pub fn filter(&self) -> String {
        match &self.test {
            Some(test) => format!("{}: {}", self.module, test),
            None => self.module.clone(),
        }
    }

    pub fn url(&self, config: &RunnerConfig) -> Result<Url> {
        let mut url = Url::parse(&config.base_url)
            .map_err(|e| OutlineError::Runner(format!("invalid base_url '{}': {e}", config.base_url)))?;
        if url.cannot_be_a_base() {
            return Err(OutlineError::Runner(format!(
                "base_url '{}' is not a hierarchical URL",
                config.base_url
            )));
        }

        {
            let mut query = url.query_pairs_mut();
            if config.hide_passed {
                query.append_key_only("hidepassed");
            }
            query.append_pair("filter", &self.filter());
        }

        tracing::debug!(file = %self.file.display(), url = %url, "built runner url");
        Ok(url)
    }
}
