//! Merge rules: defaults, override order, environment overrides.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Environment variable prefix; nested keys are separated by `__`,
/// e.g. `LIVEPREVIEW__CONSOLE__CAPACITY=20`.
pub const ENV_PREFIX: &str = "LIVEPREVIEW";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("console.capacity", 50)?
        .set_default("logging.level", "info")
}

/// Environment overrides are applied last and win over every file source.
pub fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    )
}
