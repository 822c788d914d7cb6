//! Applying responses: stale checks, then the state update.

use std::fmt;

use querydesk_common::{Event, Operation};
use querydesk_remote::RemoteError;
use tracing::{debug, info, warn};

use crate::commands::WorkflowCommand;
use crate::error::WorkflowError;
use crate::extract::extract_query;
use crate::session::DatasetHandle;

use super::request::{CompletedRequest, Reply};
use super::sequencer::{basis_for, Slot};
use super::Coordinator;

/// Why a response was dropped instead of applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// A newer request of the same kind was issued after this one.
    Superseded,
    /// The dataset, query, or result this request was built from has changed.
    UpstreamChanged,
}

impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscardReason::Superseded => f.write_str("superseded by a newer request"),
            DiscardReason::UpstreamChanged => f.write_str("session changed while in flight"),
        }
    }
}

/// What a commit did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Uploaded(DatasetHandle),
    SchemaLoaded { columns: usize },
    QueryDrafted { query: String },
    QueryRevised { query: String, revision: u32 },
    Executed { rows: usize },
    Answered,
    Discarded {
        operation: Operation,
        reason: DiscardReason,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Committed {
    pub outcome: Outcome,
    /// A command the workflow runs next on its own (schema after upload).
    pub follow_up: Option<WorkflowCommand>,
}

impl Committed {
    fn done(outcome: Outcome) -> Self {
        Self {
            outcome,
            follow_up: None,
        }
    }
}

impl Coordinator {
    /// Apply a finished request to the session.
    ///
    /// Responses that are no longer current are discarded, successful or
    /// not. A current failure leaves the session untouched and is returned.
    pub fn commit(&mut self, completed: CompletedRequest) -> Result<Committed, WorkflowError> {
        let CompletedRequest {
            ticket,
            operation,
            basis,
            reply,
        } = completed;
        let slot = Slot::for_operation(operation);

        if !self.sequencer.is_latest(slot, ticket) {
            return Ok(self.discard(operation, DiscardReason::Superseded, reply.is_ok()));
        }
        self.sequencer.settle(slot, ticket);

        if basis != basis_for(operation, self.session.lineage()) {
            return Ok(self.discard(operation, DiscardReason::UpstreamChanged, reply.is_ok()));
        }

        match reply.and_then(|reply| self.apply(reply)) {
            Ok(committed) => Ok(committed),
            Err(source) => {
                warn!(session = %self.id, %operation, error = %source, "request failed");
                self.publish(Event::OperationFailed {
                    operation,
                    message: source.to_string(),
                });
                Err(WorkflowError::Remote { operation, source })
            }
        }
    }

    fn discard(&self, operation: Operation, reason: DiscardReason, succeeded: bool) -> Committed {
        if succeeded {
            info!(session = %self.id, %operation, %reason, "discarding response");
        } else {
            debug!(session = %self.id, %operation, %reason, "discarding failed response");
        }
        self.publish(Event::ResponseDiscarded {
            operation,
            reason: reason.to_string(),
        });
        Committed::done(Outcome::Discarded { operation, reason })
    }

    fn apply(&mut self, reply: Reply) -> Result<Committed, RemoteError> {
        let committed = match reply {
            Reply::Uploaded { file_name, receipt } => {
                let dataset = DatasetHandle::new(file_name, receipt.message, receipt.columns);
                self.session.replace_dataset(dataset.clone());
                info!(session = %self.id, file = %dataset.file_name, "dataset uploaded");
                self.publish(Event::DatasetUploaded {
                    file_name: dataset.file_name.clone(),
                    message: dataset.message.clone(),
                });
                Committed {
                    outcome: Outcome::Uploaded(dataset),
                    follow_up: self
                        .auto_fetch_schema
                        .then_some(WorkflowCommand::FetchSchema),
                }
            }
            Reply::Schema(schema) => {
                let columns = schema.len();
                self.session.set_schema(schema.clone());
                info!(session = %self.id, columns, "schema loaded");
                self.publish(Event::SchemaUpdated(schema));
                Committed::done(Outcome::SchemaLoaded { columns })
            }
            Reply::Drafted(draft) => {
                let query = non_empty_query(&draft.text)?;
                self.session.replace_query(query.clone(), false);
                info!(session = %self.id, "query drafted");
                self.publish(Event::QueryUpdated {
                    query: query.clone(),
                    revision: 0,
                });
                Committed::done(Outcome::QueryDrafted { query })
            }
            Reply::Revised(draft) => {
                let query = non_empty_query(&draft.text)?;
                self.session.replace_query(query.clone(), true);
                let revision = self.session.revisions();
                info!(session = %self.id, revision, "query revised");
                self.publish(Event::QueryUpdated {
                    query: query.clone(),
                    revision,
                });
                Committed::done(Outcome::QueryRevised { query, revision })
            }
            Reply::Executed(rows) => {
                let count = rows.len();
                self.session.set_execution_result(rows.clone());
                info!(session = %self.id, rows = count, "query executed");
                self.publish(Event::ResultUpdated(rows));
                Committed::done(Outcome::Executed { rows: count })
            }
            Reply::Answered(answer) => {
                if answer.trim().is_empty() {
                    return Err(RemoteError::MalformedResponse(
                        "formatted answer is empty".into(),
                    ));
                }
                self.session.set_formatted_answer(answer.clone());
                info!(session = %self.id, "answer formatted");
                self.publish(Event::AnswerUpdated(answer));
                Committed::done(Outcome::Answered)
            }
        };
        Ok(committed)
    }
}

fn non_empty_query(response: &str) -> Result<String, RemoteError> {
    let query = extract_query(response);
    if query.is_empty() {
        Err(RemoteError::MalformedResponse("generated query is empty".into()))
    } else {
        Ok(query)
    }
}
