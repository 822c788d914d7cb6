use querydesk_common::Operation;

use crate::session::DatasetFile;

/// One user-initiated transition. Each command issues exactly one remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowCommand {
    Upload(DatasetFile),
    FetchSchema,
    Generate {
        question: String,
    },
    Regenerate {
        question: String,
        previous_query: String,
        feedback: String,
    },
    /// Run `query`, which must be the session's current query.
    Execute {
        query: String,
    },
    /// Summarize the current execution result for `question`.
    FormatAnswer {
        question: String,
    },
}

impl WorkflowCommand {
    pub fn operation(&self) -> Operation {
        match self {
            WorkflowCommand::Upload(_) => Operation::Upload,
            WorkflowCommand::FetchSchema => Operation::FetchSchema,
            WorkflowCommand::Generate { .. } => Operation::Generate,
            WorkflowCommand::Regenerate { .. } => Operation::Regenerate,
            WorkflowCommand::Execute { .. } => Operation::Execute,
            WorkflowCommand::FormatAnswer { .. } => Operation::FormatAnswer,
        }
    }
}
