//! Workflow session behavior.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fetch the schema right after a successful upload.
    pub auto_fetch_schema: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_fetch_schema: true,
        }
    }
}
