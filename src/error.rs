//! Error types for the live preview engine.

use crate::types::Generation;
use thiserror::Error;

/// Errors raised while creating or tearing down execution contexts
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("Context mount failed: {0}")]
    MountFailed(String),

    #[error("No live context with generation {0}")]
    UnknownContext(Generation),
}

/// Reasons an inbound channel message is rejected.
///
/// These never reach the user: the bridge logs them and drops the message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChannelError {
    #[error("Malformed message payload: {0}")]
    Malformed(String),

    #[error("Unrecognized message type: {0}")]
    UnknownType(String),

    #[error("Unparseable timestamp: {0}")]
    BadTimestamp(String),
}

/// Engine-level errors
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid project path: {0}")]
    InvalidPath(String),

    #[error("Sandbox error: {0}")]
    Sandbox(#[from] SandboxError),

    #[error("Watch error: {0}")]
    Watch(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for PreviewError {
    fn from(err: config::ConfigError) -> Self {
        PreviewError::ConfigError(err.to_string())
    }
}

impl From<notify::Error> for PreviewError {
    fn from(err: notify::Error) -> Self {
        PreviewError::Watch(err.to_string())
    }
}
