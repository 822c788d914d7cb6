use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Random v4 UUID in hyphenated form.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Short id tying a request's log lines together.
pub fn new_correlation_id() -> String {
    let mut cid = Uuid::new_v4().simple().to_string();
    cid.truncate(8);
    cid
}

/// Identifies one interactive session in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
