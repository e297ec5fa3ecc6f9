//! Configuration System
//!
//! Layered configuration for the preview engine: entry-resolution conventions, the
//! console buffer, the runtime resource allowlist and logging. Sources merge in
//! order defaults → user config file → project config file → environment.

use crate::entry::EntryConventions;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Entry candidate lists per role
    #[serde(default)]
    pub entries: EntryConventions,

    /// Console relay settings
    #[serde(default)]
    pub console: ConsoleConfig,

    /// External runtime resources for framework mode
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Console relay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Ring buffer capacity (oldest events are evicted first)
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    50
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

/// Runtime resources a framework-mode context may load.
///
/// These URLs are both emitted as script tags by the synthesizer and granted as the
/// only network origins in the context's capability declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Framework runtime scripts, loaded in order
    #[serde(default = "default_framework_scripts")]
    pub framework_scripts: Vec<String>,

    /// In-browser transpiler script
    #[serde(default = "default_transpiler")]
    pub transpiler: String,
}

fn default_framework_scripts() -> Vec<String> {
    vec![
        "https://unpkg.com/react@18/umd/react.development.js".to_string(),
        "https://unpkg.com/react-dom@18/umd/react-dom.development.js".to_string(),
    ]
}

fn default_transpiler() -> String {
    "https://unpkg.com/@babel/standalone/babel.min.js".to_string()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            framework_scripts: default_framework_scripts(),
            transpiler: default_transpiler(),
        }
    }
}

impl RuntimeConfig {
    /// Every resource URL a framework context may fetch
    pub fn allowlist(&self) -> Vec<&str> {
        self.framework_scripts
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.transpiler.as_str()))
            .collect()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.framework_scripts.is_empty() {
            return Err("At least one framework runtime script is required".to_string());
        }
        for url in self.allowlist() {
            if !url.starts_with("https://") || url.len() <= "https://".len() {
                return Err(format!("Runtime resource '{}' must be an https:// URL", url));
            }
            if url.contains('"') || url.chars().any(char::is_whitespace) {
                return Err(format!("Runtime resource '{}' contains invalid characters", url));
            }
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Entries(String),
    Console(String),
    Runtime(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Entries(msg) => write!(f, "Entries: {}", msg),
            ValidationError::Console(msg) => write!(f, "Console: {}", msg),
            ValidationError::Runtime(msg) => write!(f, "Runtime: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl PreviewConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.entries.validate() {
            errors.push(ValidationError::Entries(e));
        }
        if self.console.capacity == 0 {
            errors.push(ValidationError::Console(
                "capacity must be greater than zero".to_string(),
            ));
        }
        if let Err(e) = self.runtime.validate() {
            errors.push(ValidationError::Runtime(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
