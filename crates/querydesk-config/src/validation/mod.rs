//! Full configuration validation.
//!
//! Each section has its own check; this orchestrator calls them all and
//! collects errors into a single `ConfigError`.

mod helpers;
mod sections;


use crate::schema::QuerydeskConfig;
use querydesk_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &QuerydeskConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    sections::validate_remote(&mut errors, config);
    sections::validate_display(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
