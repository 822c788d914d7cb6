use super::{Action, Panel};

/// Why a typed line could not be resolved to an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseActionError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("`{command}` needs an argument: {usage}")]
    MissingArgument {
        command: &'static str,
        usage: &'static str,
    },

    #[error("unknown panel: {0}")]
    UnknownPanel(String),
}

impl Action {
    /// Resolve one line of user input. Blank lines resolve to `Action::None`.
    pub fn parse(line: &str) -> Result<Action, ParseActionError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Action::None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let action = match word.to_ascii_lowercase().as_str() {
            "upload" => Action::UploadDataset(required(rest, "upload", "upload <path>")?),
            "ask" | "question" => Action::SetQuestion(required(rest, "ask", "ask <question>")?),
            "feedback" | "describe" => {
                Action::SetFeedback(required(rest, "feedback", "feedback <text>")?)
            }
            "schema" => Action::FetchSchema,
            "generate" | "gen" => Action::GenerateQuery,
            "regenerate" | "regen" => Action::RegenerateQuery,
            "run" | "execute" => Action::RunQuery,
            "format" | "answer" => Action::FormatAnswer,
            "show" => Action::Show(parse_panel(rest)?),
            "help" | "?" => Action::Help,
            "quit" | "exit" => Action::Quit,
            other => return Err(ParseActionError::UnknownCommand(other.to_string())),
        };
        Ok(action)
    }
}

fn required(
    rest: &str,
    command: &'static str,
    usage: &'static str,
) -> Result<String, ParseActionError> {
    if rest.is_empty() {
        Err(ParseActionError::MissingArgument { command, usage })
    } else {
        Ok(rest.to_string())
    }
}

fn parse_panel(rest: &str) -> Result<Panel, ParseActionError> {
    match rest.to_ascii_lowercase().as_str() {
        "" | "status" => Ok(Panel::Status),
        "schema" => Ok(Panel::Schema),
        "query" | "sql" => Ok(Panel::Query),
        "result" | "results" => Ok(Panel::Result),
        "answer" => Ok(Panel::Answer),
        other => Err(ParseActionError::UnknownPanel(other.to_string())),
    }
}
