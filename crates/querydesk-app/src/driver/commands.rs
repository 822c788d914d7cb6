use querydesk_common::Action;
use querydesk_workflow::{SessionState, WorkflowCommand};

/// Map a remote action onto a workflow command built from session inputs.
///
/// Uploads carry a path and are resolved by the driver; local actions map
/// to `None`.
pub fn command_for(action: &Action, session: &SessionState) -> Option<WorkflowCommand> {
    let command = match action {
        Action::FetchSchema => WorkflowCommand::FetchSchema,
        Action::GenerateQuery => WorkflowCommand::Generate {
            question: session.question().to_string(),
        },
        Action::RegenerateQuery => WorkflowCommand::Regenerate {
            question: session.question().to_string(),
            previous_query: session.query().to_string(),
            feedback: session.feedback().to_string(),
        },
        Action::RunQuery => WorkflowCommand::Execute {
            query: session.query().to_string(),
        },
        Action::FormatAnswer => WorkflowCommand::FormatAnswer {
            question: session.question().to_string(),
        },
        _ => return None,
    };
    Some(command)
}
