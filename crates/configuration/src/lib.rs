use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{AdminCredentials, AdvisorConfig, Config, LoggingConfig, StorageConfig};

/// Prefix of the environment variables that override file settings,
/// e.g. `FINANCEPRO__ADVISOR__MODEL`.
const ENV_PREFIX: &str = "FINANCEPRO";

/// Loads the application configuration from an optional `config.toml` in the
/// working directory, layered with `FINANCEPRO__*` environment variables.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config.toml").required(false))
        .add_source(environment())
        .build()?;

    finish(builder)
}

/// Loads the configuration from an explicit file, which must exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment())
        .build()?;

    finish(builder)
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

fn finish(builder: config::Config) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;
    tracing::debug!(data_dir = %config.storage.data_dir.display(), "Configuration loaded.");
    Ok(config)
}

/// Rejects settings that would only fail later at a less helpful point.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.storage.ledger_key.trim().is_empty() || config.storage.settings_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage keys must not be empty".to_string(),
        ));
    }
    if config.storage.ledger_key == config.storage.settings_key {
        return Err(ConfigError::ValidationError(
            "ledger_key and settings_key must differ".to_string(),
        ));
    }
    if !(0.0..=2.0).contains(&config.advisor.temperature) {
        return Err(ConfigError::ValidationError(format!(
            "advisor.temperature must be between 0 and 2, got {}",
            config.advisor.temperature
        )));
    }
    if config.admin.username.is_empty() {
        return Err(ConfigError::ValidationError(
            "admin.username must not be empty".to_string(),
        ));
    }
    Ok(())
}
