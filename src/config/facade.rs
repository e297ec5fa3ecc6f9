//! Config loading facade: the single entry point that assembles every source.

use super::merge::merge_policy;
use super::sources::{global_file, project_file};
use super::PreviewConfig;
use crate::error::PreviewError;
use config::File;
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a project: defaults, user file, project file, environment.
    pub fn load(project_root: &Path) -> Result<PreviewConfig, PreviewError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = project_file::add_to_builder(builder, project_root)?;
        let builder = merge_policy::add_environment(builder);
        let config: PreviewConfig = builder.build()?.try_deserialize()?;
        Self::validated(config)
    }

    /// Load configuration from one explicit file plus environment overrides.
    pub fn load_from_file(path: &Path) -> Result<PreviewConfig, PreviewError> {
        if !path.exists() {
            return Err(PreviewError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = merge_policy::add_environment(builder);
        let config: PreviewConfig = builder.build()?.try_deserialize()?;
        Self::validated(config)
    }

    /// Built-in defaults only
    pub fn default() -> PreviewConfig {
        PreviewConfig::default()
    }

    fn validated(config: PreviewConfig) -> Result<PreviewConfig, PreviewError> {
        config.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            PreviewError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })?;
        debug!(
            capacity = config.console.capacity,
            scripts = config.entries.script.len(),
            "Configuration loaded"
        );
        Ok(config)
    }
}
