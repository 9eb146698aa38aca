use serde::{Deserialize, Serialize};

use crate::error::{OutlineError, Result};

/// Call names recognized as module and test declarations.
///
/// One set is shared by the structural and heuristic extractors so both
/// modes agree on what counts as a module or a test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keywords {
    /// Calls that open a module (`describe`, `module`, `context`).
    #[serde(default = "default_modules")]
    pub modules: Vec<String>,
    /// Calls that declare a test (`it`, `test`, `specify`).
    #[serde(default = "default_tests")]
    pub tests: Vec<String>,
    /// Array methods whose callback body is walked without adding a level.
    #[serde(default = "default_iterators")]
    pub iterators: Vec<String>,
}

fn default_modules() -> Vec<String> {
    vec!["describe".into(), "module".into(), "context".into()]
}

fn default_tests() -> Vec<String> {
    vec!["it".into(), "test".into(), "specify".into()]
}

fn default_iterators() -> Vec<String> {
    vec![
        "forEach".into(),
        "map".into(),
        "filter".into(),
        "every".into(),
        "some".into(),
    ]
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            modules: default_modules(),
            tests: default_tests(),
            iterators: default_iterators(),
        }
    }
}

impl Keywords {
    pub fn is_module(&self, name: &str) -> bool {
        self.modules.iter().any(|k| k == name)
    }

    pub fn is_test(&self, name: &str) -> bool {
        self.tests.iter().any(|k| k == name)
    }

    pub fn is_iterator(&self, name: &str) -> bool {
        self.iterators.iter().any(|k| k == name)
    }

    /// Reject keyword sets the heuristic scanner cannot turn into a pattern.
    pub fn validate(&self) -> Result<()> {
        if self.modules.is_empty() || self.tests.is_empty() {
            return Err(OutlineError::Config(
                "keywords.modules and keywords.tests must not be empty".into(),
            ));
        }
        let all = self
            .modules
            .iter()
            .chain(&self.tests)
            .chain(&self.iterators);
        for word in all {
            if !is_identifier(word) {
                return Err(OutlineError::Config(format!(
                    "keyword '{}' is not a valid identifier",
                    word
                )));
            }
        }
        if let Some(dup) = self.modules.iter().find(|m| self.is_test(m)) {
            return Err(OutlineError::Config(format!(
                "keyword '{}' is listed as both a module and a test",
                dup
            )));
        }
        Ok(())
    }
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
