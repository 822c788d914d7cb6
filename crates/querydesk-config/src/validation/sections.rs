//! Per-section validators: remote and display.

use crate::schema::QuerydeskConfig;

use super::helpers::{validate_http_url, validate_range};

/// Validate remote connection settings.
pub(crate) fn validate_remote(errors: &mut Vec<String>, config: &QuerydeskConfig) {
    validate_http_url(errors, "remote.base_url", &config.remote.base_url);
    validate_range(
        errors,
        "remote.connect_timeout_secs",
        config.remote.connect_timeout_secs,
        1,
        120,
    );
    validate_range(
        errors,
        "remote.request_timeout_secs",
        config.remote.request_timeout_secs,
        1,
        600,
    );
    validate_range(
        errors,
        "remote.error_body_limit",
        config.remote.error_body_limit,
        16,
        10_000,
    );
}

/// Validate display settings.
pub(crate) fn validate_display(errors: &mut Vec<String>, config: &QuerydeskConfig) {
    validate_range(errors, "display.max_rows", config.display.max_rows, 1, 10_000);
}
