//! Scripted in-memory collaborator for coordinator tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use querydesk_common::{ColumnDescriptor, Operation, Row};
use querydesk_remote::{Collaborator, QueryDraft, RegenerateRequest, RemoteError, UploadReceipt};

#[derive(Default)]
pub(crate) struct FakeCollaborator {
    uploads: Mutex<VecDeque<Result<UploadReceipt, RemoteError>>>,
    schemas: Mutex<VecDeque<Result<Vec<ColumnDescriptor>, RemoteError>>>,
    drafts: Mutex<VecDeque<Result<QueryDraft, RemoteError>>>,
    runs: Mutex<VecDeque<Result<Vec<Row>, RemoteError>>>,
    answers: Mutex<VecDeque<Result<String, RemoteError>>>,
    calls: Mutex<Vec<Call>>,
}

/// A recorded remote call and what it sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Upload { file_name: String, size: usize },
    Schema,
    Generate { question: String },
    Regenerate(RegenerateRequest),
    Run { query: String },
    Format { question: String, result_json: String },
}

impl Call {
    pub(crate) fn operation(&self) -> Operation {
        match self {
            Call::Upload { .. } => Operation::Upload,
            Call::Schema => Operation::FetchSchema,
            Call::Generate { .. } => Operation::Generate,
            Call::Regenerate(_) => Operation::Regenerate,
            Call::Run { .. } => Operation::Execute,
            Call::Format { .. } => Operation::FormatAnswer,
        }
    }
}

fn next<T>(queue: &Mutex<VecDeque<Result<T, RemoteError>>>, what: &str) -> Result<T, RemoteError> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(RemoteError::Network(format!("no scripted {what} reply"))))
}

impl FakeCollaborator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn upload_reply(self, reply: Result<UploadReceipt, RemoteError>) -> Self {
        self.uploads.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn schema_reply(self, reply: Result<Vec<ColumnDescriptor>, RemoteError>) -> Self {
        self.schemas.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn draft_reply(self, reply: Result<QueryDraft, RemoteError>) -> Self {
        self.drafts.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn run_reply(self, reply: Result<Vec<Row>, RemoteError>) -> Self {
        self.runs.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn answer_reply(self, reply: Result<String, RemoteError>) -> Self {
        self.answers.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Collaborator for FakeCollaborator {
    async fn upload_dataset(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<UploadReceipt, RemoteError> {
        self.record(Call::Upload {
            file_name: file_name.to_string(),
            size: content.len(),
        });
        next(&self.uploads, "upload")
    }

    async fn fetch_schema(&self) -> Result<Vec<ColumnDescriptor>, RemoteError> {
        self.record(Call::Schema);
        next(&self.schemas, "schema")
    }

    async fn generate_query(&self, question: &str) -> Result<QueryDraft, RemoteError> {
        self.record(Call::Generate {
            question: question.to_string(),
        });
        next(&self.drafts, "draft")
    }

    async fn regenerate_query(
        &self,
        request: &RegenerateRequest,
    ) -> Result<QueryDraft, RemoteError> {
        self.record(Call::Regenerate(request.clone()));
        next(&self.drafts, "draft")
    }

    async fn run_query(&self, query: &str) -> Result<Vec<Row>, RemoteError> {
        self.record(Call::Run {
            query: query.to_string(),
        });
        next(&self.runs, "run")
    }

    async fn format_response(
        &self,
        question: &str,
        result_json: &str,
    ) -> Result<String, RemoteError> {
        self.record(Call::Format {
            question: question.to_string(),
            result_json: result_json.to_string(),
        });
        next(&self.answers, "answer")
    }
}
