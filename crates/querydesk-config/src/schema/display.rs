//! Terminal display settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows printed from a query result (valid range: 1-10000).
    pub max_rows: u32,
    /// Pretty-print JSON row records.
    pub pretty_json: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_rows: 50,
            pretty_json: true,
        }
    }
}
