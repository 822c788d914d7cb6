use super::{Action, Panel};

impl Action {
    /// Human-readable label for the help listing.
    pub fn label(&self) -> &'static str {
        match self {
            Action::UploadDataset(_) => "Upload Dataset",
            Action::SetQuestion(_) => "Set Question",
            Action::SetFeedback(_) => "Set Feedback",
            Action::FetchSchema => "Fetch Schema",
            Action::GenerateQuery => "Generate Query",
            Action::RegenerateQuery => "Regenerate Query",
            Action::RunQuery => "Run Query",
            Action::FormatAnswer => "Format Answer",
            Action::Show(Panel::Schema) => "Show Schema",
            Action::Show(Panel::Query) => "Show Query",
            Action::Show(Panel::Result) => "Show Result",
            Action::Show(Panel::Answer) => "Show Answer",
            Action::Show(Panel::Status) => "Show Status",
            Action::Help => "Help",
            Action::Quit => "Quit",
            Action::None => "None",
        }
    }

    /// Usage line for the help listing.
    pub fn usage(&self) -> &'static str {
        match self {
            Action::UploadDataset(_) => "upload <path>",
            Action::SetQuestion(_) => "ask <question>",
            Action::SetFeedback(_) => "feedback <text>",
            Action::FetchSchema => "schema",
            Action::GenerateQuery => "generate",
            Action::RegenerateQuery => "regenerate",
            Action::RunQuery => "run",
            Action::FormatAnswer => "format",
            Action::Show(_) => "show [schema|query|result|answer|status]",
            Action::Help => "help",
            Action::Quit => "quit",
            Action::None => "",
        }
    }

    /// Whether this action issues a remote call.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Action::UploadDataset(_)
                | Action::FetchSchema
                | Action::GenerateQuery
                | Action::RegenerateQuery
                | Action::RunQuery
                | Action::FormatAnswer
        )
    }

    /// All actions listed by `help`, in workflow order.
    pub fn help_actions() -> Vec<Action> {
        vec![
            Action::UploadDataset(String::new()),
            Action::FetchSchema,
            Action::SetQuestion(String::new()),
            Action::GenerateQuery,
            Action::SetFeedback(String::new()),
            Action::RegenerateQuery,
            Action::RunQuery,
            Action::FormatAnswer,
            Action::Show(Panel::Status),
            Action::Help,
            Action::Quit,
        ]
    }
}
