use querydesk_common::Operation;
use querydesk_remote::RemoteError;

/// Why an operation was refused before any remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Precondition {
    #[error("no file selected")]
    NoFile,
    #[error("the selected file is empty")]
    EmptyFile,
    #[error("no dataset has been uploaded")]
    NoDataset,
    #[error("the dataset schema is not known yet")]
    NoSchema,
    #[error("the question is empty")]
    EmptyQuestion,
    #[error("no query has been generated yet")]
    NoQuery,
    #[error("the query to run is empty")]
    EmptyQuery,
    #[error("the query to run is not the current query")]
    QueryMismatch,
    #[error("there is no execution result to format")]
    NoResult,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("cannot {operation}: {reason}")]
    Precondition {
        operation: Operation,
        reason: Precondition,
    },

    #[error("{operation} failed: {source}")]
    Remote {
        operation: Operation,
        #[source]
        source: RemoteError,
    },

    #[error("{operation} failed: could not encode request: {message}")]
    Encode {
        operation: Operation,
        message: String,
    },
}

impl WorkflowError {
    pub fn operation(&self) -> Operation {
        match self {
            WorkflowError::Precondition { operation, .. }
            | WorkflowError::Remote { operation, .. }
            | WorkflowError::Encode { operation, .. } => *operation,
        }
    }

    pub fn precondition(&self) -> Option<Precondition> {
        match self {
            WorkflowError::Precondition { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_display() {
        let err = WorkflowError::Precondition {
            operation: Operation::FormatAnswer,
            reason: Precondition::NoResult,
        };
        assert_eq!(
            err.to_string(),
            "cannot format answer: there is no execution result to format"
        );
        assert_eq!(err.precondition(), Some(Precondition::NoResult));
    }

    #[test]
    fn remote_display_keeps_detail() {
        let err = WorkflowError::Remote {
            operation: Operation::Execute,
            source: RemoteError::Api {
                status: 500,
                detail: "no such column: revenue".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "run query failed: HTTP 500: no such column: revenue"
        );
        assert_eq!(err.operation(), Operation::Execute);
        assert!(err.precondition().is_none());
    }
}
