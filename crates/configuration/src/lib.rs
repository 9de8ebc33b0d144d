use crate::error::ConfigError;
use crate::settings::Config;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalyticsScope, ViewSettings};

/// Prefix for environment overrides, e.g. `FREIGHTLENS__VIEWS__TOP_CUSTOMERS_LIMIT=10`.
pub const ENV_PREFIX: &str = "FREIGHTLENS";

/// Loads the pipeline configuration.
///
/// The TOML file at `path` is optional: when it is absent, every setting falls back
/// to its default. Environment variables prefixed with [`ENV_PREFIX`] are layered on
/// top, and the merged result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_config_with_env(path, None)
}

/// Same as [`load_config`], but reads the environment layer from `env` instead of
/// the process environment when it is given. Keys use the same `FREIGHTLENS__`
/// spelling in both cases.
pub fn load_config_with_env(
    path: Option<&Path>,
    env: Option<config::Map<String, String>>,
) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        tracing::debug!(path = %path.display(), "Reading configuration file.");
        builder = builder.add_source(config::File::from(path).required(false));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("views.delayed_statuses")
                .try_parsing(true)
                .source(env),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = settings.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

/// Rejects settings that would make the views meaningless.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let views = &config.views;

    if views.delayed_statuses.iter().all(|s| s.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "views.delayed_statuses must name at least one status".to_string(),
        ));
    }
    if views.timeline_label_suffix_len == 0 {
        return Err(ConfigError::ValidationError(
            "views.timeline_label_suffix_len must be at least 1".to_string(),
        ));
    }

    Ok(())
}
