use serde::{Deserialize, Serialize};

mod action_enum;
mod labels;
mod parse;

pub use action_enum::*;
pub use parse::ParseActionError;

/// Read-only panels a view can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Panel {
    Schema,
    Query,
    Result,
    Answer,
    Status,
}
