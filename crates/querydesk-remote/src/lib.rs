//! Remote query-service client for querydesk.
//!
//! The service owns everything data-related: it parses the uploaded
//! CSV, infers the schema, writes and runs queries, and summarizes
//! results. This crate exposes those six operations behind the
//! [`Collaborator`] trait and normalizes every response into one
//! canonical shape, so callers never see per-endpoint field names.

pub mod http;
mod wire;

use async_trait::async_trait;
use querydesk_common::{ColumnDescriptor, Row};
use serde::{Deserialize, Serialize};

pub use http::{HttpCollaborator, HttpConfig};

#[async_trait]
pub trait Collaborator: Send + Sync {
    /// Send raw dataset content; the service keys it to this session.
    async fn upload_dataset(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<UploadReceipt, RemoteError>;

    async fn fetch_schema(&self) -> Result<Vec<ColumnDescriptor>, RemoteError>;

    async fn generate_query(&self, question: &str) -> Result<QueryDraft, RemoteError>;

    async fn regenerate_query(&self, request: &RegenerateRequest)
        -> Result<QueryDraft, RemoteError>;

    async fn run_query(&self, query: &str) -> Result<Vec<Row>, RemoteError>;

    /// `result_json` is the serialized row records the answer summarizes.
    async fn format_response(&self, question: &str, result_json: &str)
        -> Result<String, RemoteError>;
}

/// Acknowledgement of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub message: String,
    /// Column names echoed back by the service, if it sent them.
    #[serde(default)]
    pub columns: Vec<String>,
}

/// A generated or regenerated query, as the service returned it.
///
/// `text` may still wrap the query in a fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDraft {
    pub text: String,
}

impl QueryDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Payload for a feedback-driven regeneration, sent as one JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenerateRequest {
    pub question: String,
    pub previous_response: String,
    pub user_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    /// Non-success status. `detail` carries the service's structured
    /// error payload when it sent one.
    #[error("HTTP {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl RemoteError {
    /// Whether the service could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, RemoteError::Network(_) | RemoteError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regenerate_request_serializes_field_names() {
        let req = RegenerateRequest {
            question: "top customers".into(),
            previous_response: "SELECT 1".into(),
            user_description: "only 2024".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["question"], "top customers");
        assert_eq!(json["previous_response"], "SELECT 1");
        assert_eq!(json["user_description"], "only 2024");
    }

    #[test]
    fn api_error_display_includes_detail() {
        let err = RemoteError::Api {
            status: 500,
            detail: "no such column: revenue".into(),
        };
        assert_eq!(err.to_string(), "HTTP 500: no such column: revenue");
    }

    #[test]
    fn transport_errors_are_flagged() {
        assert!(RemoteError::Timeout.is_transport());
        assert!(RemoteError::Network("refused".into()).is_transport());
        assert!(!RemoteError::MalformedResponse("x".into()).is_transport());
    }
}
