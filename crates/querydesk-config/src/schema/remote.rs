//! Remote collaborator connection settings.

use serde::{Deserialize, Serialize};

/// Where the query service lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the query service, without a trailing path.
    pub base_url: String,
    /// TCP connect timeout in seconds (valid range: 1-120).
    pub connect_timeout_secs: u32,
    /// Whole-request timeout in seconds (valid range: 1-600).
    /// Generation and formatting calls wait on a language model.
    pub request_timeout_secs: u32,
    /// Maximum characters of an error body kept in error messages (valid range: 16-10000).
    pub error_body_limit: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8001".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
            error_body_limit: 200,
        }
    }
}
