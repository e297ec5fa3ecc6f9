//! CLI route: single route table and run context.

use crate::classify::classify_detailed;
use crate::cli::output::CommandOutput;
use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{
    format_check_text, format_classification_json, format_classification_text,
    format_status_json, format_status_text,
};
use crate::cli::watch::{watch_project, WatchOptions};
use crate::config::{ConfigLoader, PreviewConfig};
use crate::diagnose::detect;
use crate::error::PreviewError;
use crate::files::ProjectFileSet;
use crate::refresh::RefreshController;
use crate::sandbox::{IframeBackend, MemoryBackend};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Runtime context for CLI execution: project root and resolved configuration.
pub struct RunContext {
    project_root: PathBuf,
    config: PreviewConfig,
}

impl RunContext {
    /// Create run context from project root and optional config path. Uses ConfigLoader only.
    pub fn new(project_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, PreviewError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(&path)?,
            None => ConfigLoader::load(&project_root)?,
        };
        Ok(Self {
            project_root,
            config,
        })
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    fn snapshot(&self) -> Result<ProjectFileSet, PreviewError> {
        let files = ProjectFileSet::load_dir(&self.project_root)?;
        info!(files = files.len(), root = %self.project_root.display(), "Loaded project");
        Ok(files)
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, PreviewError> {
        match command {
            Commands::Classify { format } => {
                let report = classify_detailed(&self.snapshot()?);
                let text = match format {
                    OutputFormat::Text => format_classification_text(&report),
                    OutputFormat::Json => format_classification_json(&report)?,
                };
                Ok(CommandOutput::success(text))
            }
            Commands::Check => {
                let files = self.snapshot()?;
                let entries = self.config.entries.resolve(&files);
                let diagnostic = detect(&entries.script.content);
                let text = format_check_text(entries.script.path.as_deref(), diagnostic.as_ref());
                Ok(if diagnostic.is_some() {
                    CommandOutput::failure(text)
                } else {
                    CommandOutput::success(text)
                })
            }
            Commands::Synth {
                out,
                entry,
                content_file,
            } => {
                let mut controller = RefreshController::new(MemoryBackend::new(), &self.config);
                let files = self.snapshot()?;
                match (entry, content_file) {
                    (Some(entry), Some(content_file)) => {
                        let content = std::fs::read_to_string(content_file)?;
                        controller.run_with(files, entry, &content)?;
                    }
                    _ => controller.files_changed(files)?,
                }
                emit(out.as_deref(), controller.document().as_str())
            }
            Commands::Embed { out } => {
                let mut controller = RefreshController::new(IframeBackend::new(), &self.config);
                controller.files_changed(self.snapshot()?)?;
                let markup = match controller.backend().markup() {
                    Some(markup) => markup.to_string(),
                    // Diagnostics never mount a context; the page itself is the output.
                    None => controller.document().as_str().to_string(),
                };
                emit(out.as_deref(), &markup)
            }
            Commands::Status { format } => {
                let mut controller = RefreshController::new(MemoryBackend::new(), &self.config);
                // Mount failures are reported through the status itself.
                let _ = controller.files_changed(self.snapshot()?);
                let status = controller.status();
                let text = match format {
                    OutputFormat::Text => format_status_text(&status),
                    OutputFormat::Json => format_status_json(&status)?,
                };
                Ok(CommandOutput::success(text))
            }
            Commands::Watch { out, debounce_ms } => {
                let options = WatchOptions {
                    project_root: self.project_root.canonicalize()?,
                    out: absolute(out)?,
                    debounce: Duration::from_millis(*debounce_ms),
                };
                watch_project(&options, &self.config)?;
                Ok(CommandOutput::success("Watch stopped"))
            }
        }
    }
}

/// Absolute form of `path` with its parent directory resolved, so it compares equal
/// to the paths the watcher reports
fn absolute(path: &Path) -> Result<PathBuf, PreviewError> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    match (joined.parent(), joined.file_name()) {
        (Some(parent), Some(name)) if parent.exists() => Ok(parent.canonicalize()?.join(name)),
        _ => Ok(joined),
    }
}

/// Write `text` to `out`, or return it for stdout
fn emit(out: Option<&Path>, text: &str) -> Result<CommandOutput, PreviewError> {
    match out {
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(CommandOutput::success(format!(
                "Wrote {} bytes to {}",
                text.len(),
                path.display()
            )))
        }
        None => Ok(CommandOutput::success(text)),
    }
}
