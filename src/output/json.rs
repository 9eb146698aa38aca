use crate::error::Result;
use crate::ir::FileOutline;

use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    files: &'a [FileOutline],
    total_modules: usize,
    total_tests: usize,
}

/// Render outlines as a JSON report.
pub fn render(files: &[FileOutline]) -> Result<String> {
    let report = JsonReport {
        files,
        total_modules: files.iter().map(|f| f.modules.len()).sum(),
        total_tests: files.iter().map(|f| f.tests.len()).sum(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    Ok(json)
}
