//! Where the config file lives, and writing it the first time.

use std::path::{Path, PathBuf};

use querydesk_common::ConfigError;

use super::template::default_config_toml;

const APP_DIR: &str = "querydesk";
const FILE_NAME: &str = "config.toml";

/// `<platform config dir>/querydesk/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    match dirs::config_dir() {
        Some(dir) => Ok(dir.join(APP_DIR).join(FILE_NAME)),
        None => Err(ConfigError::ParseError(
            "no platform config directory".into(),
        )),
    }
}

/// Write the commented template to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_error = |what: &str, at: &Path, e: std::io::Error| {
        ConfigError::ParseError(format!("cannot {what} {}: {e}", at.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_error("create", parent, e))?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| io_error("write", path, e))?;

    tracing::info!(path = %path.display(), "wrote default config");
    Ok(())
}
