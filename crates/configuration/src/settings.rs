use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its defaults, so the tool runs without a
/// `config.toml` at all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub admin: AdminCredentials,
    pub advisor: AdvisorConfig,
    pub logging: LoggingConfig,
}

/// Where and under which keys the ledger is persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one `<key>.json` file per stored key.
    pub data_dir: PathBuf,
    /// The fixed key under which the map of client records is stored.
    pub ledger_key: String,
    /// The key holding portal-wide settings such as the public URL.
    pub settings_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".financepro"),
            ledger_key: "finance_pro_data_v4".to_string(),
            settings_key: "finance_pro_config".to_string(),
        }
    }
}

/// The single administrator login.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin".to_string(),
        }
    }
}

/// Settings for the generative-AI advice panel.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Base URL of the Generative Language REST API.
    pub endpoint: String,
    pub model: String,
    /// Sampling temperature, 0.0 to 2.0.
    pub temperature: f64,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// An inline key. Takes precedence over `api_key_env` when non-empty.
    pub api_key: Option<String>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            temperature: 0.8,
            api_key_env: "API_KEY".to_string(),
            api_key: None,
        }
    }
}

impl AdvisorConfig {
    /// The inline key if set, otherwise the value of `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
