//! querydesk configuration system.
//!
//! Provides TOML-based configuration with validation. All config
//! sections use sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use querydesk_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{QuerydeskConfig, CONFIG_SCHEMA_VERSION};

use querydesk_common::ConfigError;
use std::path::Path;

/// Environment variable that overrides `remote.base_url`.
pub const SERVER_URL_ENV: &str = "QUERYDESK_SERVER_URL";

/// Load config from the platform default path, apply environment
/// overrides, and validate the result.
pub fn load_config() -> Result<QuerydeskConfig, ConfigError> {
    let mut config = toml_loader::load_default()?;
    apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

/// Like [`load_config`], but from an explicit file.
pub fn load_config_from(path: &Path) -> Result<QuerydeskConfig, ConfigError> {
    let mut config = toml_loader::load_from_path(path)?;
    apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: &mut QuerydeskConfig) {
    if let Ok(url) = std::env::var(SERVER_URL_ENV) {
        apply_server_url(config, &url);
    }
}

pub fn apply_server_url(config: &mut QuerydeskConfig, url: &str) {
    let url = url.trim().trim_end_matches('/');
    if !url.is_empty() {
        tracing::debug!("remote.base_url overridden to {url}");
        config.remote.base_url = url.to_string();
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &QuerydeskConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
