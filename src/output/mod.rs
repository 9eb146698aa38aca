pub mod console;
pub mod json;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ir::FileOutline;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Some(Self::Console),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Render file outlines into the specified format.
pub fn render(files: &[FileOutline], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render(files)),
        OutputFormat::Json => json::render(files),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_format_names() {
        assert_eq!(OutputFormat::from_str_lenient("TEXT"), Some(OutputFormat::Console));
        assert_eq!(OutputFormat::from_str_lenient("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str_lenient("sarif"), None);
    }
}
