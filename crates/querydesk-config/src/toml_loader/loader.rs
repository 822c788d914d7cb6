//! Core TOML config loading: read from path or platform default.

use crate::schema::QuerydeskConfig;
use crate::validation;
use querydesk_common::ConfigError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields take their serde defaults. A validation failure is
/// logged and the parsed config is returned as-is; callers that need a
/// valid config run [`validation::validate`] themselves.
pub fn load_from_path(path: &Path) -> Result<QuerydeskConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "cannot read {}: {e}",
                path.display()
            )));
        }
    };

    let config: QuerydeskConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), "config has out-of-range values: {e}");
    }

    info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// A missing file is created from the commented template and defaults
/// are returned.
pub fn load_default() -> Result<QuerydeskConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!(path = %path.display(), "no config file yet");
            create_default_config(&path)?;
            Ok(QuerydeskConfig::default())
        }
        Err(e) => Err(e),
    }
}
