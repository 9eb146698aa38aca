use thiserror::Error;

pub type Result<T> = std::result::Result<T, OutlineError>;

#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("Parse error ({variant}): {message}")]
    Parse { variant: String, message: String },

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Runner URL error: {0}")]
    Runner(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl OutlineError {
    pub fn exit_code(&self) -> i32 {
        2
    }
}
