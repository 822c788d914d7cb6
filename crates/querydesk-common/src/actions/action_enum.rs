use serde::{Deserialize, Serialize};

use super::Panel;

/// Every user-triggerable action in the application.
///
/// Typed commands resolve to an `Action`; the driver maps remote actions
/// onto workflow commands and handles the rest locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    // -- Inputs --
    UploadDataset(String),
    SetQuestion(String),
    SetFeedback(String),

    // -- Remote --
    FetchSchema,
    GenerateQuery,
    RegenerateQuery,
    RunQuery,
    FormatAnswer,

    // -- View --
    Show(Panel),
    Help,
    Quit,

    // -- Noop --
    None,
}
