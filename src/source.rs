use std::path::{Path, PathBuf};

use crate::config::ScanConfig;
use crate::error::{OutlineError, Result};
use crate::ir::FileVariant;

/// A test source file selected for extraction.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub variant: FileVariant,
    pub content: String,
}

impl SourceFile {
    /// Read a single file, rejecting extensions no extractor handles.
    pub fn read(path: &Path) -> Result<Self> {
        let variant = FileVariant::from_path(path)
            .ok_or_else(|| OutlineError::UnsupportedFile(path.display().to_string()))?;
        let content = std::fs::read_to_string(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            variant,
            content,
        })
    }
}

/// Collect supported source files under `root` (or `root` itself when it is
/// a file), in path order.
pub fn collect_source_files(root: &Path, config: &ScanConfig) -> Result<Vec<SourceFile>> {
    if root.is_file() {
        return Ok(vec![SourceFile::read(root)?]);
    }
    if !root.exists() {
        return Err(OutlineError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", root.display()),
        )));
    }

    let walker = ignore::WalkBuilder::new(root)
        .hidden(!config.include_hidden)
        .git_ignore(true)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(variant) = FileVariant::from_path(path) else {
            continue;
        };

        let metadata = std::fs::metadata(path)?;
        if metadata.len() > config.max_file_size {
            tracing::debug!(path = %path.display(), size = metadata.len(), "skipping large file");
            continue;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => files.push(SourceFile {
                path: path.to_path_buf(),
                variant,
                content,
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable file, skipping");
            }
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn picks_supported_extensions_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "tests/b-test.gts", "module('b');");
        write(dir.path(), "tests/a-test.js", "module('a');");
        write(dir.path(), "tests/readme.md", "# nope");
        write(dir.path(), ".hidden/c-test.ts", "module('c');");

        let files = collect_source_files(dir.path(), &ScanConfig::default()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a-test.js", "b-test.gts"]);
        assert_eq!(files[1].variant, FileVariant::Template);
    }

    #[test]
    fn hidden_files_on_request() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ".hidden/c-test.ts", "module('c');");
        let config = ScanConfig {
            include_hidden: true,
            ..ScanConfig::default()
        };
        let files = collect_source_files(dir.path(), &config).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn skips_large_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "big-test.js", &"x".repeat(64));
        let config = ScanConfig {
            max_file_size: 16,
            ..ScanConfig::default()
        };
        assert!(collect_source_files(dir.path(), &config).unwrap().is_empty());
    }

    #[test]
    fn single_file_root() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "one-test.tsx", "describe('x', () => {});");
        let files =
            collect_source_files(&dir.path().join("one-test.tsx"), &ScanConfig::default()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].variant, FileVariant::Tsx);
    }

    #[test]
    fn unsupported_single_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "notes.txt", "test('x')");
        let err = collect_source_files(&dir.path().join("notes.txt"), &ScanConfig::default())
            .unwrap_err();
        assert!(matches!(err, OutlineError::UnsupportedFile(_)));
    }

    #[test]
    fn missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = collect_source_files(&dir.path().join("nope"), &ScanConfig::default())
            .unwrap_err();
        assert!(matches!(err, OutlineError::Io(_)));
    }
}
