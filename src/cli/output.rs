//! CLI output: error mapping and command results.

use crate::error::PreviewError;

/// Map engine errors to a string for CLI output.
pub fn map_error(e: &PreviewError) -> String {
    match e {
        PreviewError::InvalidPath(path) => format!("Not a project directory: {}", path),
        other => other.to_string(),
    }
}

/// Text to print and the process exit status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exit_code: 0,
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exit_code: 1,
        }
    }
}
