//! Configuration schema types for querydesk.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod display;
mod logging;
mod remote;
mod session;

pub use display::*;
pub use logging::*;
pub use remote::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for querydesk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct QuerydeskConfig {
    pub remote: RemoteConfig,
    pub session: SessionConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}
