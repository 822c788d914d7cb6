//! In-flight requests: built by `begin`, sent once, consumed by `commit`.

use querydesk_common::{ColumnDescriptor, Operation, Row};
use querydesk_remote::{Collaborator, QueryDraft, RegenerateRequest, RemoteError, UploadReceipt};
use tracing::debug;

use crate::session::DatasetFile;

use super::sequencer::{Slot, Ticket};

/// A request that passed its precondition and holds everything it sends.
#[derive(Debug)]
pub struct PendingRequest {
    pub(crate) ticket: Ticket,
    pub(crate) operation: Operation,
    pub(crate) basis: u64,
    pub(crate) correlation_id: String,
    pub(crate) payload: Payload,
}

#[derive(Debug)]
pub(crate) enum Payload {
    Upload(DatasetFile),
    FetchSchema,
    Generate { question: String },
    Regenerate(RegenerateRequest),
    Execute { query: String },
    FormatAnswer { question: String, result_json: String },
}

/// The response to a [`PendingRequest`], not yet applied to the session.
#[derive(Debug)]
pub struct CompletedRequest {
    pub(crate) ticket: Ticket,
    pub(crate) operation: Operation,
    pub(crate) basis: u64,
    pub(crate) reply: Result<Reply, RemoteError>,
}

/// A successful response, not yet checked for staleness.
#[derive(Debug)]
pub(crate) enum Reply {
    Uploaded {
        file_name: String,
        receipt: UploadReceipt,
    },
    Schema(Vec<ColumnDescriptor>),
    Drafted(QueryDraft),
    Revised(QueryDraft),
    Executed(Vec<Row>),
    Answered(String),
}

impl PendingRequest {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn slot(&self) -> Slot {
        Slot::for_operation(self.operation)
    }

    /// Issue the single remote call for this request.
    pub async fn send(self, remote: &dyn Collaborator) -> CompletedRequest {
        let PendingRequest {
            ticket,
            operation,
            basis,
            correlation_id,
            payload,
        } = self;

        debug!(%ticket, %operation, cid = %correlation_id, "sending request");

        let reply = match payload {
            Payload::Upload(DatasetFile { file_name, content }) => {
                let result = remote.upload_dataset(&file_name, content).await;
                result.map(|receipt| Reply::Uploaded { file_name, receipt })
            }
            Payload::FetchSchema => remote.fetch_schema().await.map(Reply::Schema),
            Payload::Generate { question } => {
                remote.generate_query(&question).await.map(Reply::Drafted)
            }
            Payload::Regenerate(request) => {
                remote.regenerate_query(&request).await.map(Reply::Revised)
            }
            Payload::Execute { query } => remote.run_query(&query).await.map(Reply::Executed),
            Payload::FormatAnswer {
                question,
                result_json,
            } => remote
                .format_response(&question, &result_json)
                .await
                .map(Reply::Answered),
        };

        debug!(%ticket, %operation, cid = %correlation_id, ok = reply.is_ok(), "request finished");

        CompletedRequest {
            ticket,
            operation,
            basis,
            reply,
        }
    }
}

impl CompletedRequest {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn is_success(&self) -> bool {
        self.reply.is_ok()
    }
}
