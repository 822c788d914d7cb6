//! Precondition checks and request construction.

use querydesk_common::{new_correlation_id, Event};
use querydesk_remote::RegenerateRequest;
use tracing::debug;

use crate::commands::WorkflowCommand;
use crate::error::{Precondition, WorkflowError};

use super::request::{Payload, PendingRequest};
use super::sequencer::{basis_for, Slot};
use super::Coordinator;

impl Coordinator {
    /// Check `command` against the session and, if allowed, issue a ticket
    /// for it. Session data is never modified here.
    pub fn begin(&mut self, command: WorkflowCommand) -> Result<PendingRequest, WorkflowError> {
        let operation = command.operation();

        let payload = match self.payload_for(command) {
            Ok(payload) => payload,
            Err(err) => {
                debug!(%operation, %err, "request rejected");
                self.publish(Event::OperationFailed {
                    operation,
                    message: err.to_string(),
                });
                return Err(err);
            }
        };

        let ticket = self.sequencer.issue(Slot::for_operation(operation));
        Ok(PendingRequest {
            ticket,
            operation,
            basis: basis_for(operation, self.session.lineage()),
            correlation_id: new_correlation_id(),
            payload,
        })
    }

    fn payload_for(&self, command: WorkflowCommand) -> Result<Payload, WorkflowError> {
        let operation = command.operation();
        let refuse = |reason: Precondition| WorkflowError::Precondition { operation, reason };
        let session = &self.session;

        match command {
            WorkflowCommand::Upload(file) => {
                if file.file_name.trim().is_empty() {
                    return Err(refuse(Precondition::NoFile));
                }
                if file.content.is_empty() {
                    return Err(refuse(Precondition::EmptyFile));
                }
                Ok(Payload::Upload(file))
            }
            WorkflowCommand::FetchSchema => {
                if session.dataset().is_none() {
                    return Err(refuse(Precondition::NoDataset));
                }
                Ok(Payload::FetchSchema)
            }
            WorkflowCommand::Generate { question } => {
                let question = question.trim();
                if question.is_empty() {
                    return Err(refuse(Precondition::EmptyQuestion));
                }
                if session.dataset().is_none() {
                    return Err(refuse(Precondition::NoDataset));
                }
                if session.schema().is_empty() {
                    return Err(refuse(Precondition::NoSchema));
                }
                Ok(Payload::Generate {
                    question: question.to_string(),
                })
            }
            WorkflowCommand::Regenerate {
                question,
                previous_query,
                feedback,
            } => {
                if !session.has_query() || previous_query.trim().is_empty() {
                    return Err(refuse(Precondition::NoQuery));
                }
                Ok(Payload::Regenerate(RegenerateRequest {
                    question,
                    previous_response: previous_query,
                    user_description: feedback,
                }))
            }
            WorkflowCommand::Execute { query } => {
                let query = query.trim();
                if query.is_empty() {
                    return Err(refuse(Precondition::EmptyQuery));
                }
                if !session.has_query() {
                    return Err(refuse(Precondition::NoQuery));
                }
                if query != session.query() {
                    return Err(refuse(Precondition::QueryMismatch));
                }
                Ok(Payload::Execute {
                    query: query.to_string(),
                })
            }
            WorkflowCommand::FormatAnswer { question } => {
                let rows = session.execution_result();
                if rows.is_empty() {
                    return Err(refuse(Precondition::NoResult));
                }
                let result_json =
                    serde_json::to_string(rows).map_err(|e| WorkflowError::Encode {
                        operation,
                        message: e.to_string(),
                    })?;
                Ok(Payload::FormatAnswer {
                    question,
                    result_json,
                })
            }
        }
    }
}
