//! test-outline — module/test outlines for JavaScript and TypeScript test files.
//!
//! Finds `describe`/`module`/`context` and `it`/`test`/`specify` calls and
//! reports each one with its fully-qualified path (`"A > B"`,
//! `"A > B: name"`) and source offset. Regular `.js`/`.ts` files are parsed
//! with tree-sitter; Ember `.gjs`/`.gts` files, which embed `<template>`
//! markup, are scanned heuristically.
//!
//! # Quick Start
//!
//! ```no_run
//! use testoutline::{extract, ir::FileVariant};
//!
//! let source = r#"module("A", function () { test("b", function () {}); });"#;
//! let outline = extract(source, FileVariant::Tsx);
//! assert_eq!(outline.tests[0].path, "A: b");
//! ```

pub mod config;
pub mod error;
pub mod ir;
pub mod output;
pub mod parser;
pub mod runner;
pub mod source;

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;

use config::Config;
use error::Result;
use ir::{Extraction, FileOutline, FileVariant, LineIndex, NodeKind, OutlineItem};
use output::OutputFormat;
use parser::{Keywords, Outliner};
use runner::{RunTarget, RunnerConfig};
use source::SourceFile;

static DEFAULT_OUTLINER: Lazy<Outliner> =
    Lazy::new(|| Outliner::new(&Keywords::default()).expect("default keywords are valid"));

/// Extract the outline of one document with the default keyword sets.
///
/// Never fails: a document that cannot be parsed yields an empty outline.
pub fn extract(source: &str, variant: FileVariant) -> Extraction {
    DEFAULT_OUTLINER.outline(source, variant)
}

/// Options for a scan invocation.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Path to config file (defaults to the nearest `.testoutline.toml`).
    pub config_path: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            format: OutputFormat::Console,
        }
    }
}

/// Complete scan report.
#[derive(Debug)]
pub struct ScanReport {
    pub root: PathBuf,
    /// Files that declared at least one module or test, in path order.
    pub files: Vec<FileOutline>,
}

impl ScanReport {
    pub fn module_count(&self) -> usize {
        self.files.iter().map(|f| f.modules.len()).sum()
    }

    pub fn test_count(&self) -> usize {
        self.files.iter().map(|f| f.tests.len()).sum()
    }
}

/// Run a complete scan: load config, collect files, extract outlines.
pub fn scan(path: &Path, options: &ScanOptions) -> Result<ScanReport> {
    let config = match &options.config_path {
        Some(config_path) => Config::load(config_path)?,
        None => Config::load_nearest(path)?,
    };

    let outliner = Outliner::new(&config.keywords)?;
    let sources = source::collect_source_files(path, &config.scan)?;
    tracing::debug!(root = %path.display(), files = sources.len(), "collected sources");

    let mut files = Vec::new();
    for file in &sources {
        let outline = outline_file(file, &outliner, &config.runner)?;
        if outline.modules.is_empty() && outline.tests.is_empty() {
            continue;
        }
        files.push(outline);
    }

    Ok(ScanReport {
        root: path.to_path_buf(),
        files,
    })
}

/// Extract one file and attach locations and runner links.
pub fn outline_file(
    file: &SourceFile,
    outliner: &Outliner,
    runner: &RunnerConfig,
) -> Result<FileOutline> {
    let extraction = outliner.outline(&file.content, file.variant);
    let index = LineIndex::new(&file.content);

    let mut modules = Vec::with_capacity(extraction.modules.len());
    for entry in &extraction.modules {
        let target = RunTarget::from_module_entry(entry, &file.path);
        modules.push(OutlineItem {
            kind: NodeKind::Module,
            path: entry.path.clone(),
            position: entry.position,
            location: index.locate(&file.path, &file.content, entry.position),
            run_url: target.url(runner)?.to_string(),
        });
    }

    let mut tests = Vec::with_capacity(extraction.tests.len());
    for entry in &extraction.tests {
        let target = RunTarget::from_test_entry(entry, &file.path);
        tests.push(OutlineItem {
            kind: NodeKind::Test,
            path: entry.path.clone(),
            position: entry.position,
            location: index.locate(&file.path, &file.content, entry.position),
            run_url: target.url(runner)?.to_string(),
        });
    }

    Ok(FileOutline {
        path: file.path.clone(),
        variant: file.variant,
        modules,
        tests,
        module_tests: extraction.module_tests,
    })
}

/// Render a scan report in the specified format.
pub fn render_report(report: &ScanReport, format: OutputFormat) -> Result<String> {
    output::render(&report.files, format)
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    const FIXTURES: &str = "tests/fixtures/ember_app";

    fn paths(items: &[OutlineItem]) -> Vec<&str> {
        items.iter().map(|i| i.path.as_str()).collect()
    }

    #[test]
    fn extract_spec_examples() {
        let out = extract(
            r#"module("A", function(){ test("b", function(){}); })"#,
            FileVariant::Tsx,
        );
        assert_eq!(out.modules[0].path, "A");
        assert_eq!(out.tests[0].path, "A: b");

        let out = extract(r#"test("x", function(){});"#, FileVariant::Tsx);
        assert!(out.tests.is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let source = std::fs::read_to_string(
            Path::new(FIXTURES).join("tests/integration/greeting-test.gjs"),
        )
        .unwrap();
        assert_eq!(
            extract(&source, FileVariant::Template),
            extract(&source, FileVariant::Template)
        );
    }

    #[cfg(feature = "typescript")]
    #[test]
    fn scans_fixture_project() {
        let report = scan(Path::new(FIXTURES), &ScanOptions::default()).unwrap();
        let names: Vec<String> = report
            .files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        // broken-test.js fails to parse and is left out.
        assert_eq!(
            names,
            vec!["greeting-test.gjs", "cart-test.ts", "format-test.js"]
        );

        let gjs = &report.files[0];
        assert_eq!(gjs.variant, FileVariant::Template);
        assert_eq!(paths(&gjs.modules), vec!["Integration | Component | greeting"]);
        assert_eq!(
            paths(&gjs.tests),
            vec![
                "Integration | Component | greeting: it renders",
                "Integration | Component | greeting: it greets by name",
            ]
        );

        let ts = &report.files[1];
        assert_eq!(
            paths(&ts.modules),
            vec!["Unit | Service | cart", "Unit | Service | cart > totals"]
        );
        assert_eq!(
            paths(&ts.tests),
            vec![
                "Unit | Service | cart: starts empty",
                // The loop body is read once; the name stops at `${`.
                "Unit | Service | cart > totals: sums ",
            ]
        );

        let js = &report.files[2];
        assert_eq!(paths(&js.modules), vec!["format", "format > currency"]);
        assert_eq!(
            paths(&js.tests),
            vec!["format > currency: rounds", "format > currency: case "]
        );
    }

    #[cfg(feature = "typescript")]
    #[test]
    fn items_carry_locations_and_urls() {
        let report = scan(
            &Path::new(FIXTURES).join("tests/unit/format-test.js"),
            &ScanOptions::default(),
        )
        .unwrap();
        let file = &report.files[0];
        let content = std::fs::read_to_string(&file.path).unwrap();

        for item in file.modules.iter().chain(&file.tests) {
            let line = content.lines().nth(item.location.line - 1).unwrap();
            let rest: String = line.chars().skip(item.location.column).collect();
            assert!(rest.starts_with("describe(") || rest.starts_with("it("));
            assert!(item.run_url.starts_with("http://localhost:4200/tests?hidepassed&filter="));
        }
        assert_eq!(report.module_count(), 2);
        assert_eq!(report.test_count(), 2);
    }

    #[test]
    fn explicit_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("custom.toml");
        std::fs::write(
            &config_path,
            "[keywords]\nmodules = [\"suite\"]\ntests = [\"check\"]\n\n[runner]\nbase_url = \"http://localhost:7357/\"\nhide_passed = false\n",
        )
        .unwrap();
        let test_file = dir.path().join("custom-test.gts");
        std::fs::write(&test_file, "suite('s', () => {});\ncheck('c', () => {});\n").unwrap();

        let options = ScanOptions {
            config_path: Some(config_path),
            format: OutputFormat::Json,
        };
        let report = scan(dir.path(), &options).unwrap();
        assert_eq!(report.files.len(), 1);
        assert_eq!(paths(&report.files[0].tests), vec!["s: c"]);
        assert_eq!(
            report.files[0].tests[0].run_url,
            "http://localhost:7357/?filter=s%3A+c"
        );

        let rendered = render_report(&report, options.format).unwrap();
        assert!(rendered.contains("\"total_tests\": 1"));
    }

    #[test]
    fn invalid_runner_url_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(config::CONFIG_FILE_NAME),
            "[runner]\nbase_url = \"::nope::\"\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("a-test.gjs"), "module('a');").unwrap();
        let err = scan(dir.path(), &ScanOptions::default()).unwrap_err();
        assert!(matches!(err, error::OutlineError::Runner(_)));
    }
}
