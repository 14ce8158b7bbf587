use std::path::PathBuf;
use std::process::ExitStatus;

/// Everything that can stop a scaffold run, or a single step of it.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("unknown template '{key}'. Available: {available}")]
    UnknownTemplate { key: String, available: String },

    #[error("invalid template selection '{input}', expected a number between 1 and {count}")]
    InvalidTemplateSelection { input: String, count: usize },

    #[error("invalid project name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("path {} exists but is not a directory", .0.display())]
    PathConflict(PathBuf),

    #[error("{tool} exited with {status}")]
    ExternalToolFailure { tool: String, status: ExitStatus },

    #[error("failed to run {tool}: {source}")]
    ToolUnavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("missing value for {0}")]
    MissingField(String),
}

pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;

impl ScaffoldError {
    /// Attach the path an IO operation was working on.
    pub fn fs(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| ScaffoldError::Filesystem { path, source }
    }
}

impl From<derive_builder::UninitializedFieldError> for ScaffoldError {
    fn from(e: derive_builder::UninitializedFieldError) -> Self {
        ScaffoldError::MissingField(e.field_name().to_string())
    }
}

impl From<inquire::InquireError> for ScaffoldError {
    fn from(e: inquire::InquireError) -> Self {
        ScaffoldError::Prompt(e.to_string())
    }
}
