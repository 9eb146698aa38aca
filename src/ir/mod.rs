//! Intermediate representation shared by both extraction modes.
//!
//! The structural extractor produces a [`TestNode`] tree which
//! [`flatten::flatten`] turns into an [`Extraction`]. The heuristic extractor
//! builds an [`Extraction`] directly. A [`FileOutline`] adds line/column
//! locations and runner links for presentation.

pub mod flatten;
pub mod tree;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use tree::{NodeKind, TestNode};

/// Which extraction path a source file takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileVariant {
    /// Plain TypeScript (`.ts`, `.mts`, `.cts`).
    TypeScript,
    /// JavaScript and anything that may contain JSX.
    Tsx,
    /// Ember template-tag files (`.gjs`, `.gts`) with embedded `<template>` markup.
    Template,
}

impl FileVariant {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" | "js" | "jsx" | "mjs" | "cjs" => Some(Self::Tsx),
            "gjs" | "gts" => Some(Self::Template),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether this variant goes through the syntax tree path.
    pub fn is_structural(self) -> bool {
        !matches!(self, Self::Template)
    }
}

impl std::fmt::Display for FileVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeScript => write!(f, "typescript"),
            Self::Tsx => write!(f, "tsx"),
            Self::Template => write!(f, "template"),
        }
    }
}

/// A discovered module with its fully-qualified path, e.g. `"A > B"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub path: String,
    /// Byte offset of the declaring statement or match.
    pub position: usize,
}

/// A discovered test, displayed as `"<module path>: <test name>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestEntry {
    pub path: String,
    pub position: usize,
    /// Enclosing module path.
    pub module: String,
    /// Bare test name.
    pub name: String,
}

impl TestEntry {
    pub fn new(module: &str, name: &str, position: usize) -> Self {
        Self {
            path: format!("{}: {}", module, name),
            position,
            module: module.to_string(),
            name: name.to_string(),
        }
    }
}

/// Result of extracting one document. Rebuilt from scratch on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub modules: Vec<ModuleEntry>,
    pub tests: Vec<TestEntry>,
    /// Module path to the names of the tests it directly contains.
    #[serde(default)]
    pub module_tests: BTreeMap<String, Vec<String>>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.tests.is_empty()
    }
}

/// A module or test positioned for presentation, with its runner link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineItem {
    pub kind: NodeKind,
    pub path: String,
    pub position: usize,
    pub location: SourceLocation,
    pub run_url: String,
}

/// Everything extracted from one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutline {
    pub path: PathBuf,
    pub variant: FileVariant,
    pub modules: Vec<OutlineItem>,
    pub tests: Vec<OutlineItem>,
    pub module_tests: BTreeMap<String, Vec<String>>,
}

/// Location in source code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: PathBuf,
    /// 1-based line.
    pub line: usize,
    /// 0-based column, counted in characters.
    pub column: usize,
}

/// Maps byte offsets to line/column pairs.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { line_starts }
    }

    /// Returns `(line, column)` for `offset`; offsets past the end clamp to
    /// the last line.
    pub fn line_col(&self, text: &str, offset: usize) -> (usize, usize) {
        let offset = offset.min(text.len());
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let start = self.line_starts[line_idx];
        let column = text
            .get(start..offset)
            .map(|s| s.chars().count())
            .unwrap_or(offset - start);
        (line_idx + 1, column)
    }

    pub fn locate(&self, file: &Path, text: &str, offset: usize) -> SourceLocation {
        let (line, column) = self.line_col(text, offset);
        SourceLocation {
            file: file.to_path_buf(),
            line,
            column,
        }
    }
}
